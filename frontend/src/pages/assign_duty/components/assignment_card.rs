use crate::{
    api::Assignment,
    components::{confirm_dialog::ConfirmDialog, error::InlineErrorMessage, layout::LoadingSpinner},
    pages::assign_duty::{
        repository::Candidate,
        review::{duty_label, DutyTarget, ReviewPhase},
        view_model::use_assignment_card,
    },
    state::session::{use_session, Capability},
};
use leptos::*;

fn summary_line(assignment: &Assignment) -> String {
    format!("{} ({})", duty_label(assignment), assignment.status.as_str())
}

#[component]
pub fn AssignmentCard(
    candidate: Candidate,
    #[prop(into)] target: Signal<Option<DutyTarget>>,
    on_assigned: Callback<()>,
) -> impl IntoView {
    let (session, _) = use_session();
    let can_delete = move || session.get().can(Capability::DeleteAssignments);
    let vm = use_assignment_card(
        candidate.teacher.id.clone(),
        candidate.teacher.name.clone(),
        target,
        on_assigned,
    );
    let review = vm.review;
    let phase = Signal::derive(move || review.with(|r| r.phase()));

    let year_assignments = {
        let candidate = candidate.clone();
        move || {
            target
                .get()
                .map(|t| candidate.assignments_in(t.year).to_vec())
                .unwrap_or_default()
        }
    };
    let routines = candidate
        .routines
        .iter()
        .map(|routine| routine.display.clone())
        .filter(|display| !display.is_empty())
        .collect::<Vec<_>>();
    let designation = candidate.teacher.designation.clone().unwrap_or_default();
    let campus = candidate
        .teacher
        .campus
        .as_ref()
        .map(|campus| campus.label())
        .unwrap_or_default();

    let conflicts = move || {
        let Some(target) = target.get() else {
            return Vec::new();
        };
        review.with(|r| r.conflicting(&target).cloned().collect::<Vec<_>>())
    };
    let submit_error = Signal::derive(move || review.with(|r| r.last_error.clone()));
    let delete_open = Signal::derive(move || vm.pending_delete.get().is_some());
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .get()
            .map(|a| format!("Remove {} from this teacher?", summary_line(&a)))
            .unwrap_or_default()
    });

    view! {
        <article class="bg-surface-elevated shadow rounded-lg p-4 space-y-2">
            <header class="flex justify-between items-start">
                <div>
                    <h3 class="font-semibold text-fg">{candidate.teacher.name.clone()}</h3>
                    <p class="text-xs text-fg-muted">{designation} " " {campus}</p>
                </div>
                <Show when=move || phase.get() == ReviewPhase::Closed>
                    <button
                        type="button"
                        class="rounded px-3 py-1 text-sm bg-action-primary-bg text-action-primary-text"
                        on:click=move |_| vm.open()
                    >
                        "Assign"
                    </button>
                </Show>
            </header>
            <div class="text-sm text-fg-muted">
                <p>{move || format!("Duties this year: {}", year_assignments().len())}</p>
                <ul class="list-disc list-inside">
                    {routines.into_iter().map(|display| view! { <li>{display}</li> }).collect_view()}
                </ul>
            </div>
            <Show when=move || phase.get() != ReviewPhase::Closed>
                <div class="border-t border-border pt-3 space-y-2">
                    <Show when=move || phase.get() == ReviewPhase::LoadingConflicts>
                        <LoadingSpinner />
                    </Show>
                    <Show when=move || review.with(|r| r.duplicate_conflict)>
                        <div class="text-sm text-status-error-text">
                            <p class="font-semibold">"This teacher already holds this duty for the year."</p>
                            <ul>
                                <For
                                    each=conflicts
                                    key=|assignment| assignment.id.clone()
                                    children=move |assignment| {
                                        let line = summary_line(&assignment);
                                        view! {
                                            <li class="flex items-center gap-2">
                                                <span>{line}</span>
                                                <Show when=can_delete>
                                                    {
                                                        let assignment = assignment.clone();
                                                        view! {
                                                            <button
                                                                type="button"
                                                                class="text-xs underline"
                                                                on:click=move |_| vm.pending_delete.set(Some(assignment.clone()))
                                                            >
                                                                "Remove"
                                                            </button>
                                                        }
                                                    }
                                                </Show>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </div>
                    </Show>
                    <Show when=move || review.with(|r| r.leave_conflict)>
                        <p class="text-sm text-status-warning-text">
                            {move || {
                                review.with(|r| {
                                    r.conflicting_leave
                                        .as_ref()
                                        .map(|leave| format!("On leave for this duty: {}", leave.reason))
                                        .unwrap_or_else(|| "This teacher has leave covering this duty.".to_string())
                                })
                            }}
                        </p>
                    </Show>
                    <InlineErrorMessage error=submit_error />
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="rounded px-3 py-1 text-sm bg-surface-muted text-fg"
                            on:click=move |_| vm.close()
                        >
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="rounded px-3 py-1 text-sm bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                            disabled=move || !review.with(|r| r.can_submit())
                            on:click=move |_| vm.submit()
                        >
                            {move || if phase.get() == ReviewPhase::Submitting { "Assigning..." } else { "Authorize Induction" }}
                        </button>
                    </div>
                </div>
            </Show>
            <ConfirmDialog
                is_open=delete_open
                title="Remove assignment"
                message=delete_message
                confirm_label="Remove"
                destructive=true
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
            />
        </article>
    }
}
