//! Dispatch workflow: assign a truck, deliver, cancel.
//!
//! Unlike `update_consignment`, these operations check the current status
//! and keep truck availability in step with the consignment.
//!
//! Every write is conditional on the state it was checked against
//! (`is_available = 1`, `status = 'pending'` / `'dispatched'`), so two
//! concurrent requests cannot both win: the loser updates zero rows and gets
//! `InvalidState`.

use chrono::Utc;
use tcc_core::entities::Consignment;
use tcc_core::enums::{ActivityAction, ConsignmentStatus, EntityType};
use tcc_core::requests::DispatchRequest;

use crate::error::DatabaseError;
use crate::helpers::fmt_datetime;
use crate::repos::consignments::{SELECT_COLS, row_to_consignment};
use crate::service::TccService;

fn require_status(
    consignment: &Consignment,
    expected: ConsignmentStatus,
) -> Result<(), DatabaseError> {
    if consignment.status == expected {
        Ok(())
    } else {
        Err(DatabaseError::InvalidState(format!(
            "Consignment {} is {}, expected {expected}",
            consignment.tracking_number, consignment.status
        )))
    }
}

fn no_longer(consignment: &Consignment, expected: ConsignmentStatus) -> DatabaseError {
    DatabaseError::InvalidState(format!(
        "Consignment {} is no longer {expected}",
        consignment.tracking_number
    ))
}

impl TccService {
    /// Consignments currently out for delivery, most recently dispatched first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_dispatched(&self) -> Result<Vec<Consignment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM consignments WHERE status = ?1
                     ORDER BY dispatched_at DESC, rowid DESC"
                ),
                [ConsignmentStatus::Dispatched.as_str()],
            )
            .await?;
        let mut consignments = Vec::new();
        while let Some(row) = rows.next().await? {
            consignments.push(row_to_consignment(&row)?);
        }
        Ok(consignments)
    }

    /// Assign a truck to a pending consignment and mark both in use.
    ///
    /// # Errors
    ///
    /// * `NotFound` for an unknown consignment
    /// * `InvalidReference` for an unknown truck
    /// * `InvalidState` unless the consignment is pending and the truck available
    pub async fn dispatch(
        &self,
        request: &DispatchRequest,
        actor: Option<&str>,
    ) -> Result<Consignment, DatabaseError> {
        let consignment = self.get_consignment(&request.consignment_id).await?;
        require_status(&consignment, ConsignmentStatus::Pending)?;

        let truck = self.require_truck(&request.truck_id, "truckId").await?;
        if !self.claim_truck(&truck.id).await? {
            return Err(DatabaseError::InvalidState(format!(
                "Truck {} is not available",
                truck.registration_number
            )));
        }

        let now = fmt_datetime(&Utc::now());
        let assigned = self
            .db()
            .conn()
            .execute(
                "UPDATE consignments
                 SET status = ?1, truck_id = ?2, dispatched_at = ?3, updated_at = ?3
                 WHERE id = ?4 AND status = ?5",
                libsql::params![
                    ConsignmentStatus::Dispatched.as_str(),
                    truck.id.as_str(),
                    now.as_str(),
                    consignment.id.as_str(),
                    ConsignmentStatus::Pending.as_str()
                ],
            )
            .await;
        match assigned {
            Ok(1) => {}
            Ok(_) => {
                self.set_truck_availability(&truck.id, true).await?;
                return Err(no_longer(&consignment, ConsignmentStatus::Pending));
            }
            Err(error) => {
                self.set_truck_availability(&truck.id, true).await?;
                return Err(error.into());
            }
        }

        self.log_activity(
            ActivityAction::Dispatched,
            EntityType::Dispatch,
            Some(&consignment.id),
            actor,
            format!(
                "Consignment {} dispatched on truck {}",
                consignment.tracking_number, truck.registration_number
            ),
        )
        .await?;

        tracing::info!(
            consignment = %consignment.tracking_number,
            truck = %truck.registration_number,
            "consignment dispatched"
        );
        self.get_consignment(&consignment.id).await
    }

    /// Mark a dispatched consignment delivered and free its truck.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `InvalidState` unless dispatched.
    pub async fn deliver(
        &self,
        consignment_id: &str,
        actor: Option<&str>,
    ) -> Result<Consignment, DatabaseError> {
        let consignment = self.get_consignment(consignment_id).await?;
        require_status(&consignment, ConsignmentStatus::Dispatched)?;

        let now = fmt_datetime(&Utc::now());
        let delivered = self
            .db()
            .conn()
            .execute(
                "UPDATE consignments SET status = ?1, delivered_at = ?2, updated_at = ?2
                 WHERE id = ?3 AND status = ?4",
                libsql::params![
                    ConsignmentStatus::Delivered.as_str(),
                    now.as_str(),
                    consignment_id,
                    ConsignmentStatus::Dispatched.as_str()
                ],
            )
            .await?;
        if delivered == 0 {
            return Err(no_longer(&consignment, ConsignmentStatus::Dispatched));
        }
        if let Some(ref truck_id) = consignment.truck_id {
            self.set_truck_availability(truck_id, true).await?;
        }

        self.log_activity(
            ActivityAction::Delivered,
            EntityType::Dispatch,
            Some(consignment_id),
            actor,
            format!("Consignment {} delivered", consignment.tracking_number),
        )
        .await?;
        self.get_consignment(consignment_id).await
    }

    /// Undo a dispatch: back to pending, truck detached and freed.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `InvalidState` unless dispatched.
    pub async fn cancel_dispatch(
        &self,
        consignment_id: &str,
        actor: Option<&str>,
    ) -> Result<Consignment, DatabaseError> {
        let consignment = self.get_consignment(consignment_id).await?;
        require_status(&consignment, ConsignmentStatus::Dispatched)?;

        let cancelled = self
            .db()
            .conn()
            .execute(
                "UPDATE consignments
                 SET status = ?1, truck_id = NULL, dispatched_at = NULL, updated_at = ?2
                 WHERE id = ?3 AND status = ?4",
                libsql::params![
                    ConsignmentStatus::Pending.as_str(),
                    fmt_datetime(&Utc::now()),
                    consignment_id,
                    ConsignmentStatus::Dispatched.as_str()
                ],
            )
            .await?;
        if cancelled == 0 {
            return Err(no_longer(&consignment, ConsignmentStatus::Dispatched));
        }
        if let Some(ref truck_id) = consignment.truck_id {
            self.set_truck_availability(truck_id, true).await?;
        }

        self.log_activity(
            ActivityAction::Cancelled,
            EntityType::Dispatch,
            Some(consignment_id),
            actor,
            format!("Dispatch of consignment {} cancelled", consignment.tracking_number),
        )
        .await?;
        self.get_consignment(consignment_id).await
    }

    /// Mark a truck in use if, and only if, it is currently available.
    async fn claim_truck(&self, truck_id: &str) -> Result<bool, DatabaseError> {
        let claimed = self
            .db()
            .conn()
            .execute(
                "UPDATE trucks SET is_available = 0, updated_at = ?1
                 WHERE id = ?2 AND is_available = 1",
                libsql::params![fmt_datetime(&Utc::now()), truck_id],
            )
            .await?;
        Ok(claimed == 1)
    }
}
