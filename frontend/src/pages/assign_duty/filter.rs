use crate::{api::EligibilityQuery, utils::time};
use leptos::*;

/// Snapshot of the four eligibility filters. All fields are raw form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub year: String,
    pub responsibility_type_id: String,
    pub class_id: String,
    pub subject_id: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            year: time::current_year().to_string(),
            responsibility_type_id: String::new(),
            class_id: String::new(),
            subject_id: String::new(),
        }
    }
}

impl FilterSelection {
    pub fn is_complete(&self) -> bool {
        [
            &self.year,
            &self.responsibility_type_id,
            &self.class_id,
            &self.subject_id,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }

    pub fn year(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }

    /// The eligibility request this selection stands for, if it is complete.
    pub fn eligibility_query(&self) -> Option<EligibilityQuery> {
        if !self.is_complete() {
            return None;
        }
        Some(EligibilityQuery {
            year: self.year()?,
            class_id: self.class_id.trim().to_string(),
            subject_id: self.subject_id.trim().to_string(),
        })
    }
}

#[derive(Clone, Copy)]
pub struct FilterState {
    pub year: RwSignal<String>,
    pub responsibility_type_id: RwSignal<String>,
    pub class_id: RwSignal<String>,
    pub subject_id: RwSignal<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        let initial = FilterSelection::default();
        Self {
            year: create_rw_signal(initial.year),
            responsibility_type_id: create_rw_signal(initial.responsibility_type_id),
            class_id: create_rw_signal(initial.class_id),
            subject_id: create_rw_signal(initial.subject_id),
        }
    }
}

impl FilterState {
    /// Tracked read of every field.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            year: self.year.get(),
            responsibility_type_id: self.responsibility_type_id.get(),
            class_id: self.class_id.get(),
            subject_id: self.subject_id.get(),
        }
    }

    pub fn reset(&self) {
        let initial = FilterSelection::default();
        self.year.set(initial.year);
        self.responsibility_type_id.set(String::new());
        self.class_id.set(String::new());
        self.subject_id.set(String::new());
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn filter_state_reads_and_resets() {
        with_runtime(|| {
            let state = FilterState::default();
            state.responsibility_type_id.set("rt1".into());
            state.class_id.set("c1".into());
            state.subject_id.set("s1".into());
            assert!(state.selection().is_complete());
            state.reset();
            assert_eq!(state.selection(), FilterSelection::default());
        });
    }
}
