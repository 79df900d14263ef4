use super::{
    client::ApiClient,
    types::{
        ApiError, GrantLeaveRequest, Leave, LeaveConflictResponse, LeaveFilter, UpdateLeaveRequest,
    },
};

impl ApiClient {
    pub async fn grant_leave(&self, payload: &GrantLeaveRequest) -> Result<Leave, ApiError> {
        let url = self.url("/leaves").await;
        let response = self.send(self.http_client().post(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn list_leaves(&self, filter: &LeaveFilter) -> Result<Vec<Leave>, ApiError> {
        self.get_json("/leaves", &filter.to_query()).await
    }

    pub async fn update_leave(
        &self,
        id: &str,
        payload: &UpdateLeaveRequest,
    ) -> Result<Leave, ApiError> {
        let url = self.url(&format!("/leaves/{}", id)).await;
        let response = self.send(self.http_client().put(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn delete_leave(&self, id: &str) -> Result<(), ApiError> {
        self.delete_resource(&format!("/leaves/{}", id)).await
    }

    pub async fn check_leave_conflict(
        &self,
        teacher_id: &str,
        responsibility_type_id: &str,
        year: i32,
    ) -> Result<LeaveConflictResponse, ApiError> {
        let params = [
            ("teacherId", teacher_id.to_string()),
            ("responsibilityTypeId", responsibility_type_id.to_string()),
            ("year", year.to_string()),
        ];
        self.get_json("/leaves/check-conflict", &params).await
    }
}
