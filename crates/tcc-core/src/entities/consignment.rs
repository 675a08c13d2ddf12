use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ConsignmentStatus;

/// A shipment tracked from creation through dispatch to delivery.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consignment {
    pub id: String,
    /// Human-facing reference, e.g. `TCC-1A2B3C4D`.
    pub tracking_number: String,
    pub origin_branch_id: String,
    pub destination_branch_id: String,
    pub sender_name: String,
    pub receiver_name: String,
    pub description: Option<String>,
    pub weight_kg: Option<f64>,
    pub status: ConsignmentStatus,
    pub truck_id: Option<String>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
