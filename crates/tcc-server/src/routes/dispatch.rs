use axum::extract::State;
use axum::{Extension, Json};
use tcc_core::entities::Consignment;
use tcc_core::identity::AuthIdentity;
use tcc_core::requests::DispatchRequest;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::require_field;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Consignment>>, ApiError> {
    Ok(Json(state.service().list_dispatched().await?))
}

pub async fn assign(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiJson(request): ApiJson<DispatchRequest>,
) -> Result<Json<Consignment>, ApiError> {
    require_field(&request.consignment_id, "consignmentId")?;
    require_field(&request.truck_id, "truckId")?;
    Ok(Json(
        state
            .service()
            .dispatch(&request, Some(&identity.user_id))
            .await?,
    ))
}

pub async fn deliver(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(consignment_id): ApiPath<String>,
) -> Result<Json<Consignment>, ApiError> {
    Ok(Json(
        state
            .service()
            .deliver(&consignment_id, Some(&identity.user_id))
            .await?,
    ))
}

pub async fn cancel(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(consignment_id): ApiPath<String>,
) -> Result<Json<Consignment>, ApiError> {
    Ok(Json(
        state
            .service()
            .cancel_dispatch(&consignment_id, Some(&identity.user_id))
            .await?,
    ))
}
