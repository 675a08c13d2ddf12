use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use tcc_core::entities::Branch;
use tcc_core::identity::AuthIdentity;
use tcc_core::requests::{BranchUpdate, NewBranch};
use tcc_core::responses::MessageResponse;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::require_field;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Branch>>, ApiError> {
    Ok(Json(state.service().list_branches().await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiJson(new): ApiJson<NewBranch>,
) -> Result<(StatusCode, Json<Branch>), ApiError> {
    require_field(&new.name, "name")?;
    require_field(&new.location, "location")?;
    let branch = state
        .service()
        .create_branch(&new, Some(&identity.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn get_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Branch>, ApiError> {
    Ok(Json(state.service().get_branch(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<BranchUpdate>,
) -> Result<Json<Branch>, ApiError> {
    if let Some(ref name) = update.name {
        require_field(name, "name")?;
    }
    if let Some(ref location) = update.location {
        require_field(location, "location")?;
    }
    let branch = state
        .service()
        .update_branch(&id, &update, Some(&identity.user_id))
        .await?;
    Ok(Json(branch))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let branch = state
        .service()
        .delete_branch(&id, Some(&identity.user_id))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Branch {} removed",
        branch.name
    ))))
}
