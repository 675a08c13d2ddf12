//! Read-only views: dashboard, activity feed and reports.

use chrono::{DateTime, SecondsFormat, Utc};
use tcc_core::enums::EntityType;
use tcc_core::responses::{ActivityListResponse, ConsignmentReport, DashboardStats, FleetReport};

use crate::{ApiClient, ClientError, query_string};

fn rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl ApiClient {
    pub async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, ClientError> {
        self.get_json("/dashboard/stats", token).await
    }

    /// `GET /activity`. The server clamps `limit` to its configured maximum.
    pub async fn activity(
        &self,
        token: &str,
        limit: Option<u32>,
        entity: Option<EntityType>,
    ) -> Result<ActivityListResponse, ClientError> {
        let query = query_string(&[
            ("limit", limit.map(|l| l.to_string())),
            ("entity", entity.map(|e| e.as_str().to_string())),
        ]);
        self.get_json(&format!("/activity{query}"), token).await
    }

    pub async fn consignment_report(
        &self,
        token: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<ConsignmentReport, ClientError> {
        let query = query_string(&[
            ("from", from.as_ref().map(rfc3339)),
            ("to", to.as_ref().map(rfc3339)),
        ]);
        self.get_json(&format!("/reports/consignments{query}"), token)
            .await
    }

    pub async fn fleet_report(&self, token: &str) -> Result<FleetReport, ClientError> {
        self.get_json("/reports/trucks", token).await
    }
}
