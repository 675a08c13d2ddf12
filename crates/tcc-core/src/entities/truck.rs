use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A vehicle in the fleet. `is_available` is cleared while it carries a dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    pub registration_number: String,
    pub branch_id: Option<String>,
    pub capacity_kg: Option<f64>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
