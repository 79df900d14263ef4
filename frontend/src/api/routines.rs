use super::{
    client::ApiClient,
    types::{ApiError, BulkUploadResponse, RoutineEntry, RoutineFilter, RoutinePayload},
};

impl ApiClient {
    pub async fn list_routines(&self, filter: &RoutineFilter) -> Result<Vec<RoutineEntry>, ApiError> {
        self.get_json("/routines", &filter.to_query()).await
    }

    pub async fn create_routine(&self, payload: &RoutinePayload) -> Result<RoutineEntry, ApiError> {
        let url = self.url("/routines").await;
        let response = self.send(self.http_client().post(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn update_routine(
        &self,
        id: &str,
        payload: &RoutinePayload,
    ) -> Result<RoutineEntry, ApiError> {
        let url = self.url(&format!("/routines/{}", id)).await;
        let response = self.send(self.http_client().put(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn delete_routine(&self, id: &str) -> Result<(), ApiError> {
        self.delete_resource(&format!("/routines/{}", id)).await
    }

    pub async fn bulk_upload_routines(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<BulkUploadResponse, ApiError> {
        self.upload_spreadsheet("/routines/upload", file_name, bytes)
            .await
    }
}
