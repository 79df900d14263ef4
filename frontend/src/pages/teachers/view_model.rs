use super::repository::TeachersRepository;
use crate::{
    api::{ApiClient, ApiError, Teacher},
    state::toast::{use_toasts, ToastState},
    utils::{
        debounce::{use_debounced, TEACHER_SEARCH_DEBOUNCE_MS},
        generation::RequestGeneration,
    },
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct TeachersViewModel {
    pub search: RwSignal<String>,
    pub debounced_search: ReadSignal<String>,
    pub teachers: RwSignal<Vec<Teacher>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
}

fn apply_search_result(
    result: Result<Vec<Teacher>, ApiError>,
    teachers: RwSignal<Vec<Teacher>>,
    error: RwSignal<Option<ApiError>>,
    toasts: ToastState,
) {
    match result {
        Ok(found) => {
            teachers.set(found);
            error.set(None);
        }
        Err(err) => {
            log::warn!("Teacher search failed: {}", err);
            toasts.error(&err);
            error.set(Some(err));
        }
    }
}

pub fn use_teachers_view_model() -> TeachersViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(TeachersRepository::new_with_client(Rc::new(api)));
    let toasts = use_toasts();
    let search = create_rw_signal(String::new());
    let debounced_search = use_debounced(search.into(), TEACHER_SEARCH_DEBOUNCE_MS);
    let teachers = create_rw_signal(Vec::<Teacher>::new());
    let loading = create_rw_signal(false);
    let error = create_rw_signal(None::<ApiError>);
    let generation = RequestGeneration::new();

    create_effect(move |_| {
        let term = debounced_search.get();
        let ticket = generation.next();
        let generation = generation.clone();
        let repo = repository.get_value();
        loading.set(true);
        spawn_local(async move {
            let result = repo.search(&term).await;
            if generation.is_current(ticket) {
                loading.set(false);
                apply_search_result(result, teachers, error, toasts);
            }
        });
    });

    TeachersViewModel {
        search,
        debounced_search,
        teachers,
        loading,
        error,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::teacher, ssr::with_runtime};

    #[test]
    fn view_model_starts_with_empty_search() {
        with_runtime(|| {
            let vm = use_teachers_view_model();
            assert!(vm.search.get_untracked().is_empty());
            assert!(vm.debounced_search.get_untracked().is_empty());
            assert!(vm.teachers.get_untracked().is_empty());
        });
    }

    #[test]
    fn failed_search_keeps_previous_rows() {
        with_runtime(|| {
            let toasts = ToastState::new();
            let teachers = create_rw_signal(vec![teacher("t1", "Ayesha")]);
            let error = create_rw_signal(None);
            apply_search_result(
                Err(ApiError::request_failed("offline")),
                teachers,
                error,
                toasts,
            );
            assert_eq!(teachers.get_untracked().len(), 1);
            assert!(error.get_untracked().is_some());

            apply_search_result(Ok(vec![]), teachers, error, toasts);
            assert!(teachers.get_untracked().is_empty());
            assert!(error.get_untracked().is_none());
        });
    }
}
