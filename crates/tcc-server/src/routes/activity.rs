use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use tcc_core::enums::EntityType;
use tcc_core::responses::ActivityListResponse;
use tcc_db::repos::activity::ActivityFilter;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u32>,
    pub entity: Option<EntityType>,
}

/// Newest entries first; `limit` is clamped to `general.max_activity_limit`.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ActivityQuery>,
) -> Result<Json<ActivityListResponse>, ApiError> {
    let filter = ActivityFilter {
        entity: query.entity,
        limit: Some(state.config().general.activity_limit(query.limit)),
        ..Default::default()
    };
    let entries = state.service().list_activity(&filter).await?;
    Ok(Json(ActivityListResponse::from(entries)))
}
