use crate::api::{
    ApiClient, ApiError, Assignment, AssignmentFilter, CreateAssignmentRequest, EligibilityQuery,
    LeaveConflictResponse, MasterDataKind, MasterDataRecord, RoutineEntry, RoutineFilter, Teacher,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, rc::Rc};

/// An eligible teacher together with the context shown on their card.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub teacher: Teacher,
    pub assignments_by_year: BTreeMap<i32, Vec<Assignment>>,
    pub routines: Vec<RoutineEntry>,
}

impl Candidate {
    pub fn assignments_in(&self, year: i32) -> &[Assignment] {
        self.assignments_by_year
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub responsibility_types: Vec<MasterDataRecord>,
    pub classes: Vec<MasterDataRecord>,
    pub subjects: Vec<MasterDataRecord>,
}

impl FilterOptions {
    pub fn responsibility_type(&self, id: &str) -> Option<&MasterDataRecord> {
        self.responsibility_types.iter().find(|record| record.id == id)
    }
}

pub fn group_by_year(assignments: Vec<Assignment>) -> BTreeMap<i32, Vec<Assignment>> {
    let mut grouped: BTreeMap<i32, Vec<Assignment>> = BTreeMap::new();
    for assignment in assignments {
        grouped.entry(assignment.year).or_default().push(assignment);
    }
    grouped
}

#[derive(Clone)]
pub struct AssignDutyRepository {
    client: Rc<ApiClient>,
}

impl AssignDutyRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load_options(&self) -> Result<FilterOptions, ApiError> {
        let (responsibility_types, classes, subjects) = futures::try_join!(
            self.client.list_master_data(MasterDataKind::Responsibility),
            self.client.list_master_data(MasterDataKind::Class),
            self.client.list_master_data(MasterDataKind::Subject),
        )?;
        Ok(FilterOptions {
            responsibility_types,
            classes,
            subjects,
        })
    }

    /// Eligible teachers for the query, each enriched with assignment history
    /// and routine. Order follows the eligibility response. A teacher whose
    /// enrichment fails is left out.
    pub async fn load_candidates(
        &self,
        query: &EligibilityQuery,
    ) -> Result<Vec<Candidate>, ApiError> {
        let teachers = self.client.get_eligible_teachers(query).await?;
        log::debug!(
            "{} eligible teachers for year {} class {} subject {}",
            teachers.len(),
            query.year,
            query.class_id,
            query.subject_id
        );
        let enriched = join_all(teachers.into_iter().map(|teacher| self.enrich(teacher))).await;
        Ok(enriched.into_iter().flatten().collect())
    }

    async fn enrich(&self, teacher: Teacher) -> Option<Candidate> {
        let assignment_filter = AssignmentFilter::for_teacher(teacher.id.clone());
        let routine_filter = RoutineFilter::for_teacher(teacher.id.clone());
        let (assignments, routines) = futures::join!(
            self.client.list_assignments(&assignment_filter),
            self.client.list_routines(&routine_filter),
        );
        match (assignments, routines) {
            (Ok(assignments), Ok(routines)) => Some(Candidate {
                teacher,
                assignments_by_year: group_by_year(assignments),
                routines,
            }),
            (Err(err), _) | (_, Err(err)) => {
                log::warn!("Dropping teacher {} from candidates: {}", teacher.id, err);
                None
            }
        }
    }

    pub async fn existing_assignments(
        &self,
        teacher_id: &str,
        year: i32,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.client.get_teacher_assignments(teacher_id, year).await
    }

    pub async fn leave_conflict(
        &self,
        teacher_id: &str,
        responsibility_type_id: &str,
        year: i32,
    ) -> Result<LeaveConflictResponse, ApiError> {
        self.client
            .check_leave_conflict(teacher_id, responsibility_type_id, year)
            .await
    }

    pub async fn submit(&self, request: &CreateAssignmentRequest) -> Result<Assignment, ApiError> {
        self.client.create_assignment(request).await
    }

    pub async fn delete_assignment(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_assignment(id).await
    }
}

impl Default for AssignDutyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::assignment;

    #[test]
    fn group_by_year_buckets_in_ascending_order() {
        let mut older = assignment("a1", Some("rt1"), "Invigilator", "Assigned");
        older.year = 2023;
        let newer = assignment("a2", Some("rt2"), "Exam Coordinator", "Assigned");
        let also_newer = assignment("a3", Some("rt3"), "Class Teacher", "Cancelled");
        let grouped = group_by_year(vec![newer, older, also_newer]);
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![2023, 2025]);
        assert_eq!(grouped[&2025].len(), 2);
    }

    #[test]
    fn filter_options_serialize_for_resources() {
        let raw = serde_json::json!({
            "responsibility_types": [{ "_id": "rt1", "name": "Invigilator" }],
            "classes": [],
            "subjects": []
        });
        let options: FilterOptions = serde_json::from_value(raw).unwrap();
        assert_eq!(options.responsibility_type("rt1").map(|r| r.name.as_str()), Some("Invigilator"));
        let encoded = serde_json::to_string(&options).unwrap();
        let decoded: FilterOptions = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, options);
    }
}
