use reqwest::Method;
use tcc_core::entities::User;
use tcc_core::requests::{LoginRequest, RegisterRequest};
use tcc_core::responses::LoginResponse;

use crate::{ApiClient, ClientError};

impl ApiClient {
    /// `POST /auth/login`. The returned token is not stored anywhere; hand
    /// it to a `Session` to persist it.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] for bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/auth/login", None, &body).await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with status 409 when the email is taken.
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, ClientError> {
        self.send_json(Method::POST, "/auth/register", None, request)
            .await
    }

    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] for a missing, invalid or expired token.
    pub async fn me(&self, token: &str) -> Result<User, ClientError> {
        self.get_json("/auth/me", token).await
    }
}
