//! Roles, statuses, activity actions and entity kinds for TCC.
//!
//! All enums use `snake_case` serialization. Consignment status is a flat
//! field: clients set it directly and no transition table is enforced.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Account role. Admins manage users; everyone else uses the operational routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConsignmentStatus
// ---------------------------------------------------------------------------

/// Status of a consignment.
///
/// ```text
/// pending → dispatched → delivered
/// ```
///
/// The arrow is the usual flow, not a constraint: `PUT /consignments/{id}`
/// may set any value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConsignmentStatus {
    #[default]
    Pending,
    Dispatched,
    Delivered,
}

impl ConsignmentStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Dispatched, Self::Delivered];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatched => "dispatched",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for ConsignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActivityAction
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
    StatusChanged,
    Dispatched,
    Delivered,
    Cancelled,
    Login,
}

impl ActivityAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::StatusChanged => "status_changed",
            Self::Dispatched => "dispatched",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity an activity entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Branch,
    Truck,
    Consignment,
    Dispatch,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Branch => "branch",
            Self::Truck => "truck",
            Self::Consignment => "consignment",
            Self::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(role_admin, Role, Role::Admin, "admin");
    test_serde_roundtrip!(
        status_dispatched,
        ConsignmentStatus,
        ConsignmentStatus::Dispatched,
        "dispatched"
    );
    test_serde_roundtrip!(
        action_status_changed,
        ActivityAction,
        ActivityAction::StatusChanged,
        "status_changed"
    );
    test_serde_roundtrip!(entity_dispatch, EntityType, EntityType::Dispatch, "dispatch");

    #[test]
    fn defaults() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(ConsignmentStatus::default(), ConsignmentStatus::Pending);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let parsed = serde_json::from_str::<ConsignmentStatus>("\"in_transit\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Role::User), "user");
        assert_eq!(format!("{}", ConsignmentStatus::Delivered), "delivered");
        assert_eq!(format!("{}", ActivityAction::Cancelled), "cancelled");
        assert_eq!(format!("{}", EntityType::Consignment), "consignment");
        for status in ConsignmentStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
        }
    }
}
