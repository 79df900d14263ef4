use reqwest::multipart::{Form, Part};

use super::{
    client::ApiClient,
    types::{ApiError, BulkUploadResponse, Teacher, TeacherPayload},
};

impl ApiClient {
    pub async fn list_teachers(&self, search: Option<&str>) -> Result<Vec<Teacher>, ApiError> {
        let mut params = Vec::new();
        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            params.push(("search", term.to_string()));
        }
        self.get_json("/teachers", &params).await
    }

    pub async fn get_teacher(&self, id: &str) -> Result<Teacher, ApiError> {
        self.get_json(&format!("/teachers/{}", id), &[]).await
    }

    pub async fn create_teacher(&self, payload: &TeacherPayload) -> Result<Teacher, ApiError> {
        let url = self.url("/teachers").await;
        let response = self.send(self.http_client().post(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn update_teacher(
        &self,
        id: &str,
        payload: &TeacherPayload,
    ) -> Result<Teacher, ApiError> {
        let url = self.url(&format!("/teachers/{}", id)).await;
        let response = self.send(self.http_client().put(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn bulk_upload_teachers(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<BulkUploadResponse, ApiError> {
        self.upload_spreadsheet("/teachers/upload", file_name, bytes)
            .await
    }

    pub(crate) async fn upload_spreadsheet(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<BulkUploadResponse, ApiError> {
        let url = self.url(path).await;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self
            .send(self.http_client().post(url).multipart(form))
            .await?;
        self.map_json_response(response).await
    }
}
