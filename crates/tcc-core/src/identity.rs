use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Authenticated caller identity attached to each protected request.
///
/// Produced by `tcc-auth` from verified token claims, consumed by the server
/// handlers and by `tcc-db` as the activity-log actor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthIdentity {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl AuthIdentity {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
