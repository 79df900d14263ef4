use super::{
    filter::{FilterSelection, FilterState},
    repository::{AssignDutyRepository, Candidate, FilterOptions},
    review::{load_conflicts, AssignmentReview, DutyTarget, SubmitOutcome},
};
use crate::{
    api::{ApiClient, ApiError, Assignment, CreateAssignmentRequest},
    state::toast::{use_toasts, ToastState},
    utils::generation::RequestGeneration,
};
use leptos::*;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum CandidateLoad {
    Cleared,
    Loaded(Vec<Candidate>),
    Failed(ApiError),
}

/// Fetches candidates only for a complete selection; anything less clears
/// the list without touching the network.
pub async fn fetch_candidates(
    repo: &AssignDutyRepository,
    selection: &FilterSelection,
) -> CandidateLoad {
    let Some(query) = selection.eligibility_query() else {
        return CandidateLoad::Cleared;
    };
    match repo.load_candidates(&query).await {
        Ok(candidates) => CandidateLoad::Loaded(candidates),
        Err(err) => {
            log::warn!("Eligibility lookup failed: {}", err);
            CandidateLoad::Failed(err)
        }
    }
}

pub fn duty_target(
    selection: &FilterSelection,
    options: Option<&FilterOptions>,
) -> Option<DutyTarget> {
    let query = selection.eligibility_query()?;
    let responsibility_type_id = selection.responsibility_type_id.trim().to_string();
    let responsibility_type_name = options
        .and_then(|options| options.responsibility_type(&responsibility_type_id))
        .map(|record| record.name.clone())
        .unwrap_or_default();
    Some(DutyTarget {
        responsibility_type_id,
        responsibility_type_name,
        class_id: query.class_id,
        subject_id: query.subject_id,
        year: query.year,
    })
}

fn apply_candidate_load(
    load: CandidateLoad,
    candidates: RwSignal<Vec<Candidate>>,
    list_error: RwSignal<Option<ApiError>>,
    toasts: ToastState,
) {
    match load {
        CandidateLoad::Cleared => {
            candidates.set(Vec::new());
            list_error.set(None);
        }
        CandidateLoad::Loaded(loaded) => {
            candidates.set(loaded);
            list_error.set(None);
        }
        CandidateLoad::Failed(err) => {
            candidates.set(Vec::new());
            toasts.error(&err);
            list_error.set(Some(err));
        }
    }
}

/// Applies a finished lookup only if no newer one has started since `ticket`.
fn settle_candidate_load(
    generation: &RequestGeneration,
    ticket: u64,
    load: CandidateLoad,
    candidates: RwSignal<Vec<Candidate>>,
    loading: RwSignal<bool>,
    list_error: RwSignal<Option<ApiError>>,
    toasts: ToastState,
) -> bool {
    if !generation.is_current(ticket) {
        log::debug!("Discarding stale candidate response");
        return false;
    }
    loading.set(false);
    apply_candidate_load(load, candidates, list_error, toasts);
    true
}

#[derive(Clone, Copy)]
pub struct AssignDutyViewModel {
    pub filter: FilterState,
    pub options: Resource<u32, Result<FilterOptions, ApiError>>,
    pub candidates: RwSignal<Vec<Candidate>>,
    pub loading: RwSignal<bool>,
    pub list_error: RwSignal<Option<ApiError>>,
    pub target: Memo<Option<DutyTarget>>,
    options_reload: RwSignal<u32>,
    refresh: RwSignal<u32>,
    repository: StoredValue<AssignDutyRepository>,
}

impl AssignDutyViewModel {
    pub fn request_refresh(&self) {
        self.refresh.update(|value| *value = value.wrapping_add(1));
    }

    pub fn retry_options(&self) {
        self.options_reload
            .update(|value| *value = value.wrapping_add(1));
    }

    pub fn repository(&self) -> AssignDutyRepository {
        self.repository.get_value()
    }
}

pub fn use_assign_duty_view_model() -> AssignDutyViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(AssignDutyRepository::new_with_client(Rc::new(api)));
    let toasts = use_toasts();
    let filter = FilterState::default();
    let candidates = create_rw_signal(Vec::<Candidate>::new());
    let loading = create_rw_signal(false);
    let list_error = create_rw_signal(None::<ApiError>);
    let options_reload = create_rw_signal(0u32);
    let refresh = create_rw_signal(0u32);
    let generation = RequestGeneration::new();

    let options = create_resource(
        move || options_reload.get(),
        move |_| {
            let repo = repository.get_value();
            async move { repo.load_options().await }
        },
    );

    let target = create_memo(move |_| {
        let selection = filter.selection();
        let options = options.get().and_then(Result::ok);
        duty_target(&selection, options.as_ref())
    });

    create_effect(move |_| {
        let selection = filter.selection();
        refresh.track();
        let ticket = generation.next();
        if selection.eligibility_query().is_none() {
            loading.set(false);
            apply_candidate_load(CandidateLoad::Cleared, candidates, list_error, toasts);
            return;
        }
        loading.set(true);
        let repo = repository.get_value();
        let generation = generation.clone();
        spawn_local(async move {
            let load = fetch_candidates(&repo, &selection).await;
            settle_candidate_load(&generation, ticket, load, candidates, loading, list_error, toasts);
        });
    });

    AssignDutyViewModel {
        filter,
        options,
        candidates,
        loading,
        list_error,
        target,
        options_reload,
        refresh,
        repository,
    }
}

fn apply_submit_result(
    result: Option<Result<Assignment, ApiError>>,
    review: RwSignal<AssignmentReview>,
    teacher_name: &str,
    toasts: ToastState,
    on_assigned: Callback<()>,
) {
    let Some(result) = result else {
        return;
    };
    let outcome = review
        .try_update(|review| review.finish_submit(result))
        .unwrap_or(SubmitOutcome::Ignored);
    match outcome {
        SubmitOutcome::Assigned(_) => {
            toasts.success(format!("Duty assigned to {}", teacher_name));
            on_assigned.call(());
        }
        SubmitOutcome::Failed(err) => {
            toasts.error(&err);
        }
        SubmitOutcome::Ignored => {}
    }
}

fn apply_delete_result(
    result: Option<Result<(), ApiError>>,
    toasts: ToastState,
    reload_existing: impl FnOnce(),
) {
    match result {
        Some(Ok(())) => {
            toasts.success("Assignment removed");
            reload_existing();
        }
        Some(Err(err)) => {
            toasts.error(&err);
        }
        None => {}
    }
}

#[derive(Clone, Copy)]
pub struct AssignmentCardViewModel {
    pub review: RwSignal<AssignmentReview>,
    pub pending_delete: RwSignal<Option<Assignment>>,
    pub submit_action: Action<CreateAssignmentRequest, Result<Assignment, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
    teacher_id: StoredValue<String>,
    target: Signal<Option<DutyTarget>>,
    repository: StoredValue<AssignDutyRepository>,
    toasts: ToastState,
}

impl AssignmentCardViewModel {
    pub fn open(&self) {
        let Some(target) = self.target.get_untracked() else {
            self.toasts.info("Select year, duty, class and subject first");
            return;
        };
        let ticket = self.review.try_update(AssignmentReview::open);
        if let Some(ticket) = ticket {
            self.spawn_conflict_checks(ticket, target);
        }
    }

    fn spawn_conflict_checks(&self, ticket: u64, target: DutyTarget) {
        let repo = self.repository.get_value();
        let teacher_id = self.teacher_id.get_value();
        let review = self.review;
        spawn_local(async move {
            let checks = load_conflicts(&repo, &teacher_id, &target).await;
            let _ = review.try_update(|review| checks.apply_to(review, ticket, &target));
        });
    }

    fn reload_existing(&self) {
        let Some(target) = self.target.get_untracked() else {
            return;
        };
        let Some(ticket) = self.review.try_update(AssignmentReview::reload_existing) else {
            return;
        };
        let repo = self.repository.get_value();
        let teacher_id = self.teacher_id.get_value();
        let review = self.review;
        spawn_local(async move {
            let existing = repo.existing_assignments(&teacher_id, target.year).await;
            let _ = review.try_update(|review| review.apply_existing(ticket, &target, existing));
        });
    }

    pub fn close(&self) {
        self.pending_delete.set(None);
        self.review.update(AssignmentReview::close);
    }

    pub fn submit(&self) {
        let Some(target) = self.target.get_untracked() else {
            return;
        };
        let allowed = self
            .review
            .try_update(AssignmentReview::begin_submit)
            .unwrap_or(false);
        if allowed {
            let request = target.request_for(&self.teacher_id.get_value());
            self.submit_action.dispatch(request);
        }
    }

    pub fn confirm_delete(&self) {
        if let Some(assignment) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(assignment.id);
        }
    }
}

pub fn use_assignment_card(
    teacher_id: String,
    teacher_name: String,
    target: Signal<Option<DutyTarget>>,
    on_assigned: Callback<()>,
) -> AssignmentCardViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(AssignDutyRepository::new_with_client(Rc::new(api)));
    let toasts = use_toasts();
    let review = create_rw_signal(AssignmentReview::default());
    let pending_delete = create_rw_signal(None::<Assignment>);

    let submit_action = create_action(move |request: &CreateAssignmentRequest| {
        let repo = repository.get_value();
        let request = request.clone();
        async move { repo.submit(&request).await }
    });
    let delete_action = create_action(move |id: &String| {
        let repo = repository.get_value();
        let id = id.clone();
        async move { repo.delete_assignment(&id).await }
    });

    let vm = AssignmentCardViewModel {
        review,
        pending_delete,
        submit_action,
        delete_action,
        teacher_id: store_value(teacher_id),
        target,
        repository,
        toasts,
    };

    create_effect(move |_| {
        apply_submit_result(
            submit_action.value().get(),
            review,
            &teacher_name,
            toasts,
            on_assigned,
        );
    });
    create_effect(move |_| {
        apply_delete_result(delete_action.value().get(), toasts, || vm.reload_existing());
    });

    vm
}
