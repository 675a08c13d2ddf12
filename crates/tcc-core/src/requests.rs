//! Request payloads accepted by the REST API.
//!
//! Create payloads carry required fields; update payloads carry `Option`
//! fields where only `Some` values are applied. Nullable columns use
//! `Option<Option<T>>` so that an explicit JSON `null` clears the value while
//! an absent key leaves it untouched.

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{ConsignmentStatus, Role};

/// Deserialize a present key (including `null`) as `Some(inner)`.
///
/// Paired with `#[serde(default)]`, absent keys stay `None`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Auth / users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Admin-side user creation; unlike registration the role is selectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBranch {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl BranchUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }
}

// ---------------------------------------------------------------------------
// Trucks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTruck {
    pub registration_number: String,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub capacity_kg: Option<f64>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub branch_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity_kg: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl TruckUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.registration_number.is_none()
            && self.branch_id.is_none()
            && self.capacity_kg.is_none()
            && self.is_available.is_none()
    }
}

pub struct TruckUpdateBuilder(TruckUpdate);

impl Default for TruckUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TruckUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TruckUpdate::default())
    }

    #[must_use]
    pub fn registration_number(mut self, value: impl Into<String>) -> Self {
        self.0.registration_number = Some(value.into());
        self
    }

    #[must_use]
    pub fn branch_id(mut self, value: Option<String>) -> Self {
        self.0.branch_id = Some(value);
        self
    }

    #[must_use]
    pub fn capacity_kg(mut self, value: Option<f64>) -> Self {
        self.0.capacity_kg = Some(value);
        self
    }

    #[must_use]
    pub const fn is_available(mut self, value: bool) -> Self {
        self.0.is_available = Some(value);
        self
    }

    #[must_use]
    pub fn build(self) -> TruckUpdate {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Consignments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsignment {
    pub origin_branch_id: String,
    pub destination_branch_id: String,
    pub sender_name: String,
    pub receiver_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsignmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_kg: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConsignmentStatus>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub truck_id: Option<Option<String>>,
}

impl ConsignmentUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.origin_branch_id.is_none()
            && self.destination_branch_id.is_none()
            && self.sender_name.is_none()
            && self.receiver_name.is_none()
            && self.description.is_none()
            && self.weight_kg.is_none()
            && self.status.is_none()
            && self.truck_id.is_none()
    }
}

pub struct ConsignmentUpdateBuilder(ConsignmentUpdate);

impl Default for ConsignmentUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsignmentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ConsignmentUpdate::default())
    }

    #[must_use]
    pub fn origin_branch_id(mut self, value: impl Into<String>) -> Self {
        self.0.origin_branch_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn destination_branch_id(mut self, value: impl Into<String>) -> Self {
        self.0.destination_branch_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn sender_name(mut self, value: impl Into<String>) -> Self {
        self.0.sender_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn receiver_name(mut self, value: impl Into<String>) -> Self {
        self.0.receiver_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn description(mut self, value: Option<String>) -> Self {
        self.0.description = Some(value);
        self
    }

    #[must_use]
    pub fn weight_kg(mut self, value: Option<f64>) -> Self {
        self.0.weight_kg = Some(value);
        self
    }

    #[must_use]
    pub const fn status(mut self, value: ConsignmentStatus) -> Self {
        self.0.status = Some(value);
        self
    }

    #[must_use]
    pub fn truck_id(mut self, value: Option<String>) -> Self {
        self.0.truck_id = Some(value);
        self
    }

    #[must_use]
    pub fn build(self) -> ConsignmentUpdate {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Assign `truck_id` to `consignment_id` and mark the consignment in transit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub consignment_id: String,
    pub truck_id: String,
}
