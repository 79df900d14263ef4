//! Review workflow behind each assignment card.
//!
//! [`AssignmentReview`] holds no I/O. The card view model feeds it the results
//! of [`load_conflicts`] and of the submit call, tagged with the ticket handed
//! out by [`AssignmentReview::open`] so that answers for a closed or reopened
//! review are ignored.

use super::repository::AssignDutyRepository;
use crate::api::{
    ApiError, Assignment, CreateAssignmentRequest, Leave, LeaveConflictResponse, Ref,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewPhase {
    #[default]
    Closed,
    LoadingConflicts,
    Reviewing,
    Submitting,
}

/// The duty being assigned, fixed by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyTarget {
    pub responsibility_type_id: String,
    pub responsibility_type_name: String,
    pub class_id: String,
    pub subject_id: String,
    pub year: i32,
}

impl DutyTarget {
    pub fn request_for(&self, teacher_id: &str) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            teacher: teacher_id.to_string(),
            responsibility_type: self.responsibility_type_id.clone(),
            year: self.year,
            target_class: self.class_id.clone(),
            target_subject: self.subject_id.clone(),
        }
    }
}

/// True when an active assignment already covers the target duty. Ids are
/// compared when both sides have one; otherwise names must match exactly.
pub fn has_duplicate_assignment(existing: &[Assignment], target: &DutyTarget) -> bool {
    existing
        .iter()
        .filter(|assignment| assignment.status.is_assigned())
        .any(|assignment| {
            let Some(duty) = assignment.responsibility_type.as_ref() else {
                return false;
            };
            let id = duty.id();
            if !id.is_empty() && !target.responsibility_type_id.is_empty() {
                id == target.responsibility_type_id
            } else {
                duty.name() == Some(target.responsibility_type_name.as_str())
            }
        })
}

/// What the card should do after a submit attempt settles.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Assigned(Assignment),
    Failed(ApiError),
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentReview {
    phase: ReviewPhase,
    ticket: u64,
    existing: Option<Vec<Assignment>>,
    leave_checked: bool,
    pub duplicate_conflict: bool,
    pub leave_conflict: bool,
    pub conflicting_leave: Option<Leave>,
    pub last_error: Option<ApiError>,
}

impl AssignmentReview {
    pub fn phase(&self) -> ReviewPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != ReviewPhase::Closed
    }

    pub fn existing(&self) -> &[Assignment] {
        self.existing.as_deref().unwrap_or_default()
    }

    /// Active assignments that clash with `target`, for the review list.
    pub fn conflicting<'a>(&'a self, target: &'a DutyTarget) -> impl Iterator<Item = &'a Assignment> {
        self.existing()
            .iter()
            .filter(move |assignment| has_duplicate_assignment(std::slice::from_ref(*assignment), target))
    }

    /// Starts a fresh review and returns the ticket its fetches must carry.
    pub fn open(&mut self) -> u64 {
        let ticket = self.ticket.wrapping_add(1);
        *self = Self {
            phase: ReviewPhase::LoadingConflicts,
            ticket,
            ..Self::default()
        };
        ticket
    }

    /// Re-runs only the existing-assignment check, keeping the leave result.
    pub fn reload_existing(&mut self) -> u64 {
        self.ticket = self.ticket.wrapping_add(1);
        self.existing = None;
        if self.phase == ReviewPhase::Reviewing {
            self.phase = ReviewPhase::LoadingConflicts;
        }
        self.ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.is_open() && self.ticket == ticket
    }

    pub fn apply_existing(
        &mut self,
        ticket: u64,
        target: &DutyTarget,
        result: Result<Vec<Assignment>, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let existing = result.unwrap_or_else(|err| {
            log::warn!("Existing-assignment check failed: {}", err);
            Vec::new()
        });
        self.duplicate_conflict = has_duplicate_assignment(&existing, target);
        self.existing = Some(existing);
        self.settle();
        true
    }

    pub fn apply_leave(
        &mut self,
        ticket: u64,
        result: Result<LeaveConflictResponse, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let response = result.unwrap_or_else(|err| {
            log::warn!("Leave conflict check failed: {}", err);
            LeaveConflictResponse::default()
        });
        self.leave_conflict = response.has_conflict;
        self.conflicting_leave = response.leave.filter(|_| response.has_conflict);
        self.leave_checked = true;
        self.settle();
        true
    }

    fn settle(&mut self) {
        if self.phase == ReviewPhase::LoadingConflicts && self.existing.is_some() && self.leave_checked
        {
            self.phase = ReviewPhase::Reviewing;
        }
    }

    /// A leave conflict only warns; a duplicate duty blocks.
    pub fn can_submit(&self) -> bool {
        self.phase == ReviewPhase::Reviewing && !self.duplicate_conflict
    }

    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.phase = ReviewPhase::Submitting;
        self.last_error = None;
        true
    }

    pub fn finish_submit(&mut self, result: Result<Assignment, ApiError>) -> SubmitOutcome {
        if self.phase != ReviewPhase::Submitting {
            return SubmitOutcome::Ignored;
        }
        match result {
            Ok(assignment) => {
                self.close();
                SubmitOutcome::Assigned(assignment)
            }
            Err(err) => {
                self.phase = ReviewPhase::Reviewing;
                self.last_error = Some(err.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }

    pub fn close(&mut self) {
        self.phase = ReviewPhase::Closed;
        self.ticket = self.ticket.wrapping_add(1);
    }
}

pub struct ConflictChecks {
    pub existing: Result<Vec<Assignment>, ApiError>,
    pub leave: Result<LeaveConflictResponse, ApiError>,
}

impl ConflictChecks {
    pub fn apply_to(self, review: &mut AssignmentReview, ticket: u64, target: &DutyTarget) {
        review.apply_existing(ticket, target, self.existing);
        review.apply_leave(ticket, self.leave);
    }
}

/// Runs both conflict fetches for one teacher at the same time.
pub async fn load_conflicts(
    repo: &AssignDutyRepository,
    teacher_id: &str,
    target: &DutyTarget,
) -> ConflictChecks {
    let (existing, leave) = futures::join!(
        repo.existing_assignments(teacher_id, target.year),
        repo.leave_conflict(teacher_id, &target.responsibility_type_id, target.year),
    );
    ConflictChecks { existing, leave }
}

/// Label for a responsibility reference that may be unpopulated.
pub fn duty_label(assignment: &Assignment) -> String {
    assignment
        .responsibility_type
        .as_ref()
        .map(Ref::label)
        .unwrap_or_else(|| "Removed duty".to_string())
}


#[cfg(all(test, not(target_arch = "wasm32"), not(coverage)))]
mod host_tests {
    use super::*;
    use crate::api::ApiClient;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::rc::Rc;

    fn duty() -> DutyTarget {
        DutyTarget {
            responsibility_type_id: "rt1".into(),
            responsibility_type_name: "Exam Coordinator".into(),
            class_id: "c1".into(),
            subject_id: "s1".into(),
            year: 2025,
        }
    }

    fn repository(server: &MockServer) -> AssignDutyRepository {
        AssignDutyRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )))
    }

    /// Drives a review the way the card does: open, check, then submit if allowed.
    async fn review_and_submit(
        repo: &AssignDutyRepository,
        teacher_id: &str,
        target: &DutyTarget,
    ) -> (AssignmentReview, Option<SubmitOutcome>) {
        let mut review = AssignmentReview::default();
        let ticket = review.open();
        load_conflicts(repo, teacher_id, target)
            .await
            .apply_to(&mut review, ticket, target);
        if !review.begin_submit() {
            return (review, None);
        }
        let result = repo.submit(&target.request_for(teacher_id)).await;
        let outcome = review.finish_submit(result);
        (review, Some(outcome))
    }

    #[tokio::test]
    async fn clean_review_posts_exact_body_and_closes() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/assignments/teacher/t1/2025");
            then.status(200).json_body(json!([]));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/leaves/check-conflict")
                .query_param("teacherId", "t1")
                .query_param("responsibilityTypeId", "rt1")
                .query_param("year", "2025");
            then.status(200).json_body(json!({ "hasConflict": false }));
        });
        let post = server.mock(|when, then| {
            when.method(POST).path("/api/assignments").json_body(json!({
                "teacher": "t1",
                "responsibilityType": "rt1",
                "year": 2025,
                "targetClass": "c1",
                "targetSubject": "s1"
            }));
            then.status(201).json_body(json!({
                "_id": "a-new",
                "teacher": "t1",
                "responsibilityType": "rt1",
                "year": 2025,
                "status": "Assigned"
            }));
        });

        let repo = repository(&server);
        let (review, outcome) = review_and_submit(&repo, "t1", &duty()).await;
        post.assert_hits(1);
        assert!(matches!(outcome, Some(SubmitOutcome::Assigned(ref a)) if a.id == "a-new"));
        assert!(!review.is_open());
    }

    #[tokio::test]
    async fn duplicate_review_blocks_without_posting() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/assignments/teacher/t1/2025");
            then.status(200).json_body(json!([{
                "_id": "a1",
                "teacher": "t1",
                "responsibilityType": { "name": "Exam Coordinator" },
                "year": 2025,
                "status": "Assigned"
            }]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/check-conflict");
            then.status(200).json_body(json!({ "hasConflict": false }));
        });
        let post = server.mock(|when, then| {
            when.method(POST).path("/api/assignments");
            then.status(201).json_body(json!({}));
        });

        let repo = repository(&server);
        let (review, outcome) = review_and_submit(&repo, "t1", &duty()).await;
        assert!(outcome.is_none());
        assert!(review.duplicate_conflict);
        assert!(!review.can_submit());
        post.assert_hits(0);
    }

    #[tokio::test]
    async fn leave_check_failure_keeps_duplicate_result() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/assignments/teacher/t1/2025");
            then.status(200).json_body(json!([{
                "_id": "a1",
                "responsibilityType": { "_id": "rt1", "name": "Exam Coordinator" },
                "year": 2025,
                "status": "Assigned"
            }]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/check-conflict");
            then.status(500).body("down");
        });

        let repo = repository(&server);
        let mut review = AssignmentReview::default();
        let ticket = review.open();
        load_conflicts(&repo, "t1", &duty())
            .await
            .apply_to(&mut review, ticket, &duty());
        assert!(!review.leave_conflict);
        assert!(review.duplicate_conflict);
        assert_eq!(review.phase(), ReviewPhase::Reviewing);
    }

    #[tokio::test]
    async fn server_rejection_keeps_review_open_with_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/assignments/teacher/t1/2025");
            then.status(200).json_body(json!([]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/check-conflict");
            then.status(200).json_body(json!({ "hasConflict": true }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/assignments");
            then.status(409)
                .json_body(json!({ "message": "Teacher already holds this duty" }));
        });

        let repo = repository(&server);
        let (review, outcome) = review_and_submit(&repo, "t1", &duty()).await;
        assert!(matches!(outcome, Some(SubmitOutcome::Failed(ref e)) if e.is_conflict()));
        assert_eq!(review.phase(), ReviewPhase::Reviewing);
        assert!(review.leave_conflict);
        assert_eq!(
            review.last_error.map(|e| e.error),
            Some("Teacher already holds this duty".to_string())
        );
    }

    #[tokio::test]
    async fn history_with_deleted_duty_type_still_blocks_duplicate() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/assignments/teacher/t1/2025");
            then.status(200).json_body(json!([
                {
                    "_id": "a1",
                    "responsibilityType": { "_id": "rt1", "name": "Exam Coordinator" },
                    "year": 2025,
                    "status": "Assigned"
                },
                { "_id": "a2", "responsibilityType": null, "year": 2025, "status": "Assigned" }
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/check-conflict");
            then.status(200).json_body(json!({ "hasConflict": false }));
        });
        let post = server.mock(|when, then| {
            when.method(POST).path("/api/assignments");
            then.status(201).json_body(json!({}));
        });

        let repo = repository(&server);
        let (review, outcome) = review_and_submit(&repo, "t1", &duty()).await;
        assert!(outcome.is_none());
        assert!(review.duplicate_conflict);
        assert!(!review.can_submit());
        assert_eq!(review.existing().len(), 2);
        post.assert_hits(0);
    }

    #[tokio::test]
    async fn leave_without_references_still_warns() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/assignments/teacher/t1/2025");
            then.status(200).json_body(json!([]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/check-conflict");
            then.status(200).json_body(json!({
                "hasConflict": true,
                "leave": { "_id": "l1", "reason": "Sick", "year": 2025 }
            }));
        });

        let repo = repository(&server);
        let mut review = AssignmentReview::default();
        let ticket = review.open();
        load_conflicts(&repo, "t1", &duty())
            .await
            .apply_to(&mut review, ticket, &duty());
        assert!(review.leave_conflict);
        assert_eq!(
            review.conflicting_leave.as_ref().map(|leave| leave.reason.as_str()),
            Some("Sick")
        );
        assert!(review.can_submit());
    }
}
