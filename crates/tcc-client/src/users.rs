//! Admin-only user management.

use reqwest::Method;
use tcc_core::entities::User;
use tcc_core::requests::NewUser;
use tcc_core::responses::MessageResponse;

use crate::{ApiClient, ClientError, segment};

impl ApiClient {
    pub async fn list_users(&self, token: &str) -> Result<Vec<User>, ClientError> {
        self.get_json("/users", token).await
    }

    pub async fn create_user(&self, token: &str, new: &NewUser) -> Result<User, ClientError> {
        self.send_json(Method::POST, "/users", Some(token), new).await
    }

    pub async fn delete_user(&self, token: &str, id: &str) -> Result<MessageResponse, ClientError> {
        self.send_empty(Method::DELETE, &format!("/users/{}", segment(id)), token)
            .await
    }
}
