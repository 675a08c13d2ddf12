//! Response bodies returned by the REST API.
//!
//! Field names are camelCase: `totalTrucks`, `recentActivity`, ...

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ActivityLog, User};

/// Response from `POST /api/auth/login` and `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Response from `GET /api/dashboard/stats`.
///
/// Each count comes from its own query; they are not taken from one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_trucks: u64,
    pub available_trucks: u64,
    pub total_branches: u64,
    pub total_consignments: u64,
    pub pending_consignments: u64,
    pub dispatched_consignments: u64,
    pub delivered_consignments: u64,
    pub recent_activity: Vec<ActivityLog>,
}

/// Response from `GET /api/activity`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActivityListResponse {
    pub data: Vec<ActivityLog>,
    pub count: usize,
}

impl From<Vec<ActivityLog>> for ActivityListResponse {
    fn from(data: Vec<ActivityLog>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Count of consignments leaving one branch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BranchConsignmentCount {
    pub branch_id: String,
    pub branch_name: Option<String>,
    pub count: u64,
}

/// Response from `GET /api/reports/consignments`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsignmentReport {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub total: u64,
    pub pending: u64,
    pub dispatched: u64,
    pub delivered: u64,
    pub total_weight_kg: f64,
    pub by_origin_branch: Vec<BranchConsignmentCount>,
}

/// Fleet availability for one branch. `branch_id` is `None` for unassigned trucks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BranchFleet {
    pub branch_id: Option<String>,
    pub branch_name: Option<String>,
    pub total: u64,
    pub available: u64,
    pub in_use: u64,
}

/// Response from `GET /api/reports/trucks`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub total: u64,
    pub available: u64,
    pub in_use: u64,
    pub by_branch: Vec<BranchFleet>,
}

/// Plain `{ "message": ... }` body used by the health check and deletions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
