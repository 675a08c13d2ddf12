use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tcc_core::responses::{ConsignmentReport, FleetReport};

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

/// `?from=&to=`, RFC 3339, inclusive bounds on creation time.
#[derive(Debug, Default, Deserialize)]
pub struct ReportRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

pub async fn consignments(
    State(state): State<AppState>,
    ApiQuery(range): ApiQuery<ReportRange>,
) -> Result<Json<ConsignmentReport>, ApiError> {
    Ok(Json(
        state
            .service()
            .consignment_report(range.from, range.to)
            .await?,
    ))
}

pub async fn trucks(State(state): State<AppState>) -> Result<Json<FleetReport>, ApiError> {
    Ok(Json(state.service().fleet_report().await?))
}
