use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use tcc_core::entities::Consignment;
use tcc_core::enums::ConsignmentStatus;
use tcc_core::identity::AuthIdentity;
use tcc_core::requests::{ConsignmentUpdate, NewConsignment};
use tcc_core::responses::MessageResponse;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::require_field;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ConsignmentListQuery {
    pub status: Option<ConsignmentStatus>,
}

fn check_weight(weight_kg: Option<f64>) -> Result<(), ApiError> {
    match weight_kg {
        Some(w) if !w.is_finite() || w < 0.0 => Err(ApiError::bad_request(
            "weightKg must be a non-negative number",
        )),
        _ => Ok(()),
    }
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ConsignmentListQuery>,
) -> Result<Json<Vec<Consignment>>, ApiError> {
    Ok(Json(state.service().list_consignments(query.status).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiJson(new): ApiJson<NewConsignment>,
) -> Result<(StatusCode, Json<Consignment>), ApiError> {
    require_field(&new.sender_name, "senderName")?;
    require_field(&new.receiver_name, "receiverName")?;
    check_weight(new.weight_kg)?;
    let consignment = state
        .service()
        .create_consignment(&new, Some(&identity.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(consignment)))
}

pub async fn get_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Consignment>, ApiError> {
    Ok(Json(state.service().get_consignment(&id).await?))
}

pub async fn track(
    State(state): State<AppState>,
    ApiPath(tracking_number): ApiPath<String>,
) -> Result<Json<Consignment>, ApiError> {
    Ok(Json(
        state
            .service()
            .get_consignment_by_tracking(&tracking_number)
            .await?,
    ))
}

/// Partial update. `status` is taken as given.
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<ConsignmentUpdate>,
) -> Result<Json<Consignment>, ApiError> {
    check_weight(update.weight_kg.flatten())?;
    let consignment = state
        .service()
        .update_consignment(&id, &update, Some(&identity.user_id))
        .await?;
    Ok(Json(consignment))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let consignment = state
        .service()
        .delete_consignment(&id, Some(&identity.user_id))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Consignment {} removed",
        consignment.tracking_number
    ))))
}
