use super::{
    client::ApiClient,
    types::{
        ApiError, Assignment, AssignmentFilter, CreateAssignmentRequest, EligibilityQuery, Teacher,
    },
};

impl ApiClient {
    pub async fn create_assignment(
        &self,
        payload: &CreateAssignmentRequest,
    ) -> Result<Assignment, ApiError> {
        let url = self.url("/assignments").await;
        let response = self.send(self.http_client().post(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn list_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get_json("/assignments", &filter.to_query()).await
    }

    pub async fn delete_assignment(&self, id: &str) -> Result<(), ApiError> {
        self.delete_resource(&format!("/assignments/{}", id)).await
    }

    pub async fn get_teacher_assignments(
        &self,
        teacher_id: &str,
        year: i32,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get_json(&format!("/assignments/teacher/{}/{}", teacher_id, year), &[])
            .await
    }

    pub async fn get_eligible_teachers(
        &self,
        query: &EligibilityQuery,
    ) -> Result<Vec<Teacher>, ApiError> {
        self.get_json("/assignments/eligible", &query.to_query()).await
    }
}
