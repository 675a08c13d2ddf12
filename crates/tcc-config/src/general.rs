//! Listing limits shared by the server and CLI.

use serde::{Deserialize, Serialize};

const fn default_activity_limit() -> u32 {
    10
}

const fn default_max_activity_limit() -> u32 {
    100
}

const fn default_dashboard_activity_limit() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Used by `GET /api/activity` when `limit` is absent.
    #[serde(default = "default_activity_limit")]
    pub default_activity_limit: u32,

    /// Upper bound applied to any requested activity limit.
    #[serde(default = "default_max_activity_limit")]
    pub max_activity_limit: u32,

    /// Number of entries in `recentActivity` on the dashboard.
    #[serde(default = "default_dashboard_activity_limit")]
    pub dashboard_activity_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_activity_limit: default_activity_limit(),
            max_activity_limit: default_max_activity_limit(),
            dashboard_activity_limit: default_dashboard_activity_limit(),
        }
    }
}

impl GeneralConfig {
    /// Resolve a requested activity limit: absent or zero uses the default,
    /// anything above the maximum is clamped.
    #[must_use]
    pub fn activity_limit(&self, requested: Option<u32>) -> u32 {
        let limit = match requested {
            Some(0) | None => self.default_activity_limit,
            Some(n) => n,
        };
        limit.min(self.max_activity_limit)
    }
}
