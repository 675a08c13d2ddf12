//! Admin-only user management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use tcc_core::entities::User;
use tcc_core::identity::AuthIdentity;
use tcc_core::requests::NewUser;
use tcc_core::responses::MessageResponse;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::auth::create_account;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.service().list_users().await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiJson(request): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = create_account(
        &state,
        &request.name,
        &request.email,
        request.password,
        request.role,
        Some(&identity.user_id),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = state
        .service()
        .delete_user(&id, Some(&identity.user_id))
        .await?;
    Ok(Json(MessageResponse::new(format!("User {} removed", user.email))))
}
