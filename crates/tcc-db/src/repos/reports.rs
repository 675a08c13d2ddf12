//! Consignment and fleet reports.

use chrono::{DateTime, Utc};
use tcc_core::responses::{BranchConsignmentCount, BranchFleet, ConsignmentReport, FleetReport};

use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_count, get_opt_string};
use crate::service::TccService;

/// `WHERE` over `c.created_at`, inclusive on both ends.
fn created_between(
    from: Option<&DateTime<Utc>>,
    to: Option<&DateTime<Utc>>,
) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    if let Some(from) = from {
        params.push(fmt_datetime(from).into());
        conditions.push(format!("c.created_at >= ?{}", params.len()));
    }
    if let Some(to) = to {
        params.push(fmt_datetime(to).into());
        conditions.push(format!("c.created_at <= ?{}", params.len()));
    }
    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, params)
}

impl TccService {
    /// Totals by status, per-origin counts and summed weight for consignments
    /// created within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidReference` when `from` is after `to`.
    pub async fn consignment_report(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<ConsignmentReport, DatabaseError> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(DatabaseError::InvalidReference(
                "from must not be after to".into(),
            ));
        }
        let (where_clause, params) = created_between(from.as_ref(), to.as_ref());

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT COUNT(*),
                            COALESCE(SUM(c.status = 'pending'), 0),
                            COALESCE(SUM(c.status = 'dispatched'), 0),
                            COALESCE(SUM(c.status = 'delivered'), 0),
                            TOTAL(c.weight_kg)
                     FROM consignments c {where_clause}"
                ),
                libsql::params_from_iter(params.clone()),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let total = get_count(&row, 0)?;
        let pending = get_count(&row, 1)?;
        let dispatched = get_count(&row, 2)?;
        let delivered = get_count(&row, 3)?;
        let total_weight_kg = row.get::<f64>(4)?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT c.origin_branch_id, b.name, COUNT(*) AS n
                     FROM consignments c
                     LEFT JOIN branches b ON b.id = c.origin_branch_id
                     {where_clause}
                     GROUP BY c.origin_branch_id
                     ORDER BY n DESC, b.name COLLATE NOCASE"
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        let mut by_origin_branch = Vec::new();
        while let Some(row) = rows.next().await? {
            by_origin_branch.push(BranchConsignmentCount {
                branch_id: row.get(0)?,
                branch_name: get_opt_string(&row, 1)?,
                count: get_count(&row, 2)?,
            });
        }

        Ok(ConsignmentReport {
            from,
            to,
            total,
            pending,
            dispatched,
            delivered,
            total_weight_kg,
            by_origin_branch,
        })
    }

    /// Truck availability per branch. Unassigned trucks are grouped under
    /// `branch_id: None`, listed last.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn fleet_report(&self) -> Result<FleetReport, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT t.branch_id, b.name, COUNT(*), COALESCE(SUM(t.is_available), 0)
                 FROM trucks t
                 LEFT JOIN branches b ON b.id = t.branch_id
                 GROUP BY t.branch_id
                 ORDER BY t.branch_id IS NULL, b.name COLLATE NOCASE",
                (),
            )
            .await?;

        let mut report = FleetReport {
            total: 0,
            available: 0,
            in_use: 0,
            by_branch: Vec::new(),
        };
        while let Some(row) = rows.next().await? {
            let total = get_count(&row, 2)?;
            let available = get_count(&row, 3)?;
            let entry = BranchFleet {
                branch_id: get_opt_string(&row, 0)?,
                branch_name: get_opt_string(&row, 1)?,
                total,
                available,
                in_use: total.saturating_sub(available),
            };
            report.total += entry.total;
            report.available += entry.available;
            report.in_use += entry.in_use;
            report.by_branch.push(entry);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_branch, seed_consignment, seed_truck, test_service};
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;
    use tcc_core::requests::DispatchRequest;

    #[tokio::test]
    async fn consignment_totals() {
        let svc = test_service().await;
        let pune = seed_branch(&svc, "Pune").await;
        let agra = seed_branch(&svc, "Agra").await;
        let truck = seed_truck(&svc, "MH01", None).await;
        let first = seed_consignment(&svc, &pune.id, &agra.id).await;
        seed_consignment(&svc, &pune.id, &agra.id).await;
        seed_consignment(&svc, &agra.id, &pune.id).await;
        svc.dispatch(
            &DispatchRequest {
                consignment_id: first.id.clone(),
                truck_id: truck.id.clone(),
            },
            None,
        )
        .await
        .unwrap();

        let report = svc.consignment_report(None, None).await.unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.pending, 2);
        assert_eq!(report.dispatched, 1);
        assert_eq!(report.delivered, 0);
        assert!((report.total_weight_kg - 360.0).abs() < f64::EPSILON);
        assert_eq!(
            report.by_origin_branch,
            vec![
                BranchConsignmentCount {
                    branch_id: pune.id.clone(),
                    branch_name: Some("Pune".into()),
                    count: 2,
                },
                BranchConsignmentCount {
                    branch_id: agra.id.clone(),
                    branch_name: Some("Agra".into()),
                    count: 1,
                },
            ]
        );
    }

    #[tokio::test]
    async fn date_bounds_filter_creation_time() {
        let svc = test_service().await;
        let b = seed_branch(&svc, "B").await;
        seed_consignment(&svc, &b.id, &b.id).await;

        let future = Utc::now() + TimeDelta::hours(1);
        let report = svc.consignment_report(Some(future), None).await.unwrap();
        assert_eq!(report.total, 0);
        assert!(report.by_origin_branch.is_empty());
        assert!(report.total_weight_kg.abs() < f64::EPSILON);

        let past = Utc::now() - TimeDelta::hours(1);
        let report = svc
            .consignment_report(Some(past), Some(future))
            .await
            .unwrap();
        assert_eq!(report.total, 1);

        assert!(matches!(
            svc.consignment_report(Some(future), Some(past)).await,
            Err(DatabaseError::InvalidReference(_))
        ));
    }

    #[tokio::test]
    async fn fleet_groups_by_branch() {
        let svc = test_service().await;
        let pune = seed_branch(&svc, "Pune").await;
        let a = seed_truck(&svc, "T1", Some(&pune.id)).await;
        seed_truck(&svc, "T2", Some(&pune.id)).await;
        seed_truck(&svc, "T3", None).await;
        let c = seed_consignment(&svc, &pune.id, &pune.id).await;
        svc.dispatch(
            &DispatchRequest {
                consignment_id: c.id,
                truck_id: a.id,
            },
            None,
        )
        .await
        .unwrap();

        let report = svc.fleet_report().await.unwrap();
        assert_eq!((report.total, report.available, report.in_use), (3, 2, 1));
        assert_eq!(report.by_branch.len(), 2);
        assert_eq!(report.by_branch[0].branch_id.as_deref(), Some(pune.id.as_str()));
        assert_eq!(report.by_branch[0].in_use, 1);
        assert_eq!(report.by_branch[1].branch_id, None);
        assert_eq!(report.by_branch[1].total, 1);
    }
}
