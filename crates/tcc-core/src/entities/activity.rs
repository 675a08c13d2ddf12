use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActivityAction, EntityType};

/// An append-only activity entry recording a mutation, shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub action: ActivityAction,
    pub entity: EntityType,
    pub entity_id: Option<String>,
    pub user_id: Option<String>,
    pub details: String,
    pub created_at: DateTime<Utc>,
}
