use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use tcc_core::entities::Truck;
use tcc_core::identity::AuthIdentity;
use tcc_core::requests::{NewTruck, TruckUpdate};
use tcc_core::responses::MessageResponse;
use tcc_db::repos::trucks::TruckFilter;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::require_field;
use crate::state::AppState;

/// `?available=true|false&branch=<id>`
#[derive(Debug, Default, Deserialize)]
pub struct TruckListQuery {
    pub available: Option<bool>,
    pub branch: Option<String>,
}

fn check_capacity(capacity_kg: Option<f64>) -> Result<(), ApiError> {
    match capacity_kg {
        Some(c) if !c.is_finite() || c < 0.0 => Err(ApiError::bad_request(
            "capacityKg must be a non-negative number",
        )),
        _ => Ok(()),
    }
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TruckListQuery>,
) -> Result<Json<Vec<Truck>>, ApiError> {
    let filter = TruckFilter {
        available: query.available,
        branch_id: query.branch,
    };
    Ok(Json(state.service().list_trucks(&filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiJson(new): ApiJson<NewTruck>,
) -> Result<(StatusCode, Json<Truck>), ApiError> {
    require_field(&new.registration_number, "registrationNumber")?;
    check_capacity(new.capacity_kg)?;
    let truck = state
        .service()
        .create_truck(&new, Some(&identity.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(truck)))
}

pub async fn get_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Truck>, ApiError> {
    Ok(Json(state.service().get_truck(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<TruckUpdate>,
) -> Result<Json<Truck>, ApiError> {
    if let Some(ref registration) = update.registration_number {
        require_field(registration, "registrationNumber")?;
    }
    check_capacity(update.capacity_kg.flatten())?;
    let truck = state
        .service()
        .update_truck(&id, &update, Some(&identity.user_id))
        .await?;
    Ok(Json(truck))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let truck = state
        .service()
        .delete_truck(&id, Some(&identity.user_id))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Truck {} removed",
        truck.registration_number
    ))))
}
