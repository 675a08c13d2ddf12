//! Dashboard aggregation.

use tcc_core::enums::ConsignmentStatus;
use tcc_core::responses::DashboardStats;

use crate::error::DatabaseError;
use crate::repos::activity::ActivityFilter;
use crate::service::TccService;

impl TccService {
    /// Independent counts plus the latest `recent_limit` activity entries.
    ///
    /// Each figure is its own query; no snapshot spans them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    pub async fn dashboard_stats(&self, recent_limit: u32) -> Result<DashboardStats, DatabaseError> {
        let total_trucks = self.count("SELECT COUNT(*) FROM trucks", Vec::new()).await?;
        let available_trucks = self
            .count("SELECT COUNT(*) FROM trucks WHERE is_available = 1", Vec::new())
            .await?;
        let total_branches = self.count("SELECT COUNT(*) FROM branches", Vec::new()).await?;
        let total_consignments = self
            .count("SELECT COUNT(*) FROM consignments", Vec::new())
            .await?;
        let pending_consignments = self.count_by_status(ConsignmentStatus::Pending).await?;
        let dispatched_consignments = self.count_by_status(ConsignmentStatus::Dispatched).await?;
        let delivered_consignments = self.count_by_status(ConsignmentStatus::Delivered).await?;
        let recent_activity = self
            .list_activity(&ActivityFilter {
                limit: Some(recent_limit),
                ..Default::default()
            })
            .await?;

        Ok(DashboardStats {
            total_trucks,
            available_trucks,
            total_branches,
            total_consignments,
            pending_consignments,
            dispatched_consignments,
            delivered_consignments,
            recent_activity,
        })
    }

    async fn count_by_status(&self, status: ConsignmentStatus) -> Result<u64, DatabaseError> {
        self.count(
            "SELECT COUNT(*) FROM consignments WHERE status = ?1",
            vec![status.as_str().into()],
        )
        .await
    }
}
