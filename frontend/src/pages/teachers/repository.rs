use crate::api::{ApiClient, ApiError, Teacher};
use std::rc::Rc;

#[derive(Clone)]
pub struct TeachersRepository {
    client: Rc<ApiClient>,
}

impl TeachersRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Teacher>, ApiError> {
        self.client.list_teachers(Some(term)).await
    }
}
