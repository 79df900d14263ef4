use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{api::types::ApiError, config, utils::storage};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) async fn url(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Attaches the bearer token when one is persisted; without a token the
    /// request goes out unauthenticated and the server decides.
    fn with_auth(request: RequestBuilder) -> RequestBuilder {
        match storage::access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = Self::with_auth(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        Self::handle_unauthorized_status(response.status());
        Ok(response)
    }

    pub(crate) fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("API answered 401; clearing the stored session");
            storage::clear_session();
            Self::redirect_to_login_if_needed();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn redirect_to_login_if_needed() {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/login" {
                    return;
                }
            }
            let _ = location.set_href("/login");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn redirect_to_login_if_needed() {}

    pub(crate) async fn map_json_response<T>(&self, response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub(crate) async fn map_empty_response(&self, response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Converts a non-success response into an [`ApiError`]. The backend
    /// reports validation and business-rule failures as `{ "message": ... }`.
    pub(crate) async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        parse_error_body(status, &body)
    }

    pub(crate) async fn get_json<T>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path).await;
        let mut request = self.http_client().get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = self.send(request).await?;
        self.map_json_response(response).await
    }

    pub(crate) async fn delete_resource(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path).await;
        let response = self.send(self.http_client().delete(url)).await?;
        self.map_empty_response(response).await
    }
}

fn parse_error_body(status: u16, body: &str) -> ApiError {
    let fallback_code = ApiError::code_for_status(status);
    match serde_json::from_str::<ApiError>(body) {
        Ok(mut error) => {
            if error.code.trim().is_empty() {
                error.code = fallback_code.to_string();
            }
            error
        }
        Err(_) => ApiError {
            error: format!("Request failed with status {}", status),
            code: fallback_code.to_string(),
            details: None,
        },
    }
}
