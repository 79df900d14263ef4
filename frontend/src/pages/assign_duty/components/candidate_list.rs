use super::assignment_card::AssignmentCard;
use crate::{
    api::ApiError,
    components::{empty_state::EmptyState, error::InlineErrorMessage, layout::LoadingSpinner},
    pages::assign_duty::{repository::Candidate, review::DutyTarget},
};
use leptos::*;

#[component]
pub fn CandidateList(
    #[prop(into)] candidates: Signal<Vec<Candidate>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<ApiError>>,
    #[prop(into)] target: Signal<Option<DutyTarget>>,
    on_assigned: Callback<()>,
) -> impl IntoView {
    let empty_view = move || {
        if target.get().is_none() {
            view! {
                <EmptyState
                    title="Choose the duty to fill"
                    description="Pick a year, duty, class and subject to see eligible teachers."
                />
            }
            .into_view()
        } else if error.get().is_some() {
            view! { <InlineErrorMessage error=error /> }.into_view()
        } else {
            view! { <EmptyState title="No eligible teachers" /> }.into_view()
        }
    };

    view! {
        <section class="space-y-3">
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <Show when=move || !candidates.get().is_empty() fallback=empty_view>
                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-3">
                        <For
                            each=move || candidates.get()
                            key=|candidate| candidate.teacher.id.clone()
                            children=move |candidate| view! {
                                <AssignmentCard candidate=candidate target=target on_assigned=on_assigned />
                            }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::teacher, ssr::render_to_string};

    fn target() -> Option<DutyTarget> {
        Some(DutyTarget {
            responsibility_type_id: "rt1".into(),
            responsibility_type_name: "Exam Coordinator".into(),
            class_id: "c1".into(),
            subject_id: "s1".into(),
            year: 2025,
        })
    }

    fn render(candidates: Vec<Candidate>, target: Option<DutyTarget>, error: Option<ApiError>) -> String {
        render_to_string(move || {
            view! {
                <CandidateList
                    candidates=Signal::derive(move || candidates.clone())
                    loading=Signal::derive(|| false)
                    error=Signal::derive(move || error.clone())
                    target=Signal::derive(move || target.clone())
                    on_assigned=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn prompts_for_filters_when_incomplete() {
        let html = render(vec![], None, None);
        assert!(html.contains("Choose the duty to fill"));
    }

    #[test]
    fn renders_one_card_per_candidate_in_order() {
        let candidates = vec![
            Candidate {
                teacher: teacher("t2", "Bilal"),
                assignments_by_year: Default::default(),
                routines: vec![],
            },
            Candidate {
                teacher: teacher("t1", "Ayesha"),
                assignments_by_year: Default::default(),
                routines: vec![],
            },
        ];
        let html = render(candidates, target(), None);
        let bilal = html.find("Bilal").unwrap();
        let ayesha = html.find("Ayesha").unwrap();
        assert!(bilal < ayesha);
    }

    #[test]
    fn shows_error_or_empty_state_after_lookup() {
        let html = render(vec![], target(), Some(ApiError::request_failed("Network down")));
        assert!(html.contains("Network down"));
        let html = render(vec![], target(), None);
        assert!(html.contains("No eligible teachers"));
    }
}
