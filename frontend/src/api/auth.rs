use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse, UserProfile},
};
use crate::utils::storage;

impl ApiClient {
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.url("/auth/login").await;
        let response = self
            .send(self.http_client().post(url).json(&request))
            .await?;
        let login: LoginResponse = self.map_json_response(response).await?;
        persist_session(&login)?;
        Ok(login)
    }

    /// Tells the backend the token is finished with; the local session is
    /// cleared whatever the server answers.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.url("/auth/logout").await;
        let result = match self
            .send(self.http_client().post(url).json(&serde_json::json!({})))
            .await
        {
            Ok(response) => self.map_empty_response(response).await,
            Err(err) => Err(err),
        };
        storage::clear_session();
        result
    }

    pub async fn get_me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/auth/me", &[]).await
    }
}

fn persist_session(response: &LoginResponse) -> Result<(), ApiError> {
    storage::set_item(storage::ACCESS_TOKEN_KEY, &response.token).map_err(ApiError::unknown)?;
    let user_json = serde_json::to_string(&response.user)
        .map_err(|_| ApiError::unknown("Failed to serialize user profile"))?;
    storage::set_item(storage::CURRENT_USER_KEY, &user_json).map_err(ApiError::unknown)?;
    Ok(())
}

pub(crate) fn stored_user() -> Option<UserProfile> {
    storage::get_item(storage::CURRENT_USER_KEY).and_then(|raw| serde_json::from_str(&raw).ok())
}
