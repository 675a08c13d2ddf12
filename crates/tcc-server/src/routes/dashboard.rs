use axum::Json;
use axum::extract::State;
use tcc_core::responses::DashboardStats;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    let recent = state.config().general.dashboard_activity_limit;
    Ok(Json(state.service().dashboard_stats(recent).await?))
}
