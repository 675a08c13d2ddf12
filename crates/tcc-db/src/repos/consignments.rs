//! Consignment repository.
//!
//! Status is a flat field. `update_consignment` accepts any status value;
//! the guarded workflow lives in [`crate::repos::dispatch`].

use chrono::Utc;
use tcc_core::entities::Consignment;
use tcc_core::enums::{ActivityAction, ConsignmentStatus, EntityType};
use tcc_core::ids::PREFIX_CONSIGNMENT;
use tcc_core::requests::{ConsignmentUpdate, NewConsignment};

use crate::error::DatabaseError;
use crate::helpers::{
    fmt_datetime, get_opt_f64, get_opt_string, is_unique_violation, opt_real, opt_text,
    parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::service::TccService;

pub(crate) const SELECT_COLS: &str = "id, tracking_number, origin_branch_id, destination_branch_id, \
     sender_name, receiver_name, description, weight_kg, status, truck_id, \
     dispatched_at, delivered_at, created_at, updated_at";

const TRACKING_ATTEMPTS: usize = 3;

pub(crate) fn row_to_consignment(row: &libsql::Row) -> Result<Consignment, DatabaseError> {
    Ok(Consignment {
        id: row.get(0)?,
        tracking_number: row.get(1)?,
        origin_branch_id: row.get(2)?,
        destination_branch_id: row.get(3)?,
        sender_name: row.get(4)?,
        receiver_name: row.get(5)?,
        description: get_opt_string(row, 6)?,
        weight_kg: get_opt_f64(row, 7)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        truck_id: get_opt_string(row, 9)?,
        dispatched_at: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        delivered_at: parse_optional_datetime(get_opt_string(row, 11)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
        updated_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

fn require_text(value: &str, field: &str) -> Result<String, DatabaseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DatabaseError::InvalidReference(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

impl TccService {
    /// Create a pending consignment with a fresh tracking number.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidReference` for unknown branches or empty
    /// names.
    pub async fn create_consignment(
        &self,
        new: &NewConsignment,
        actor: Option<&str>,
    ) -> Result<Consignment, DatabaseError> {
        self.require_branch(&new.origin_branch_id, "originBranchId")
            .await?;
        self.require_branch(&new.destination_branch_id, "destinationBranchId")
            .await?;
        let sender_name = require_text(&new.sender_name, "senderName")?;
        let receiver_name = require_text(&new.receiver_name, "receiverName")?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CONSIGNMENT).await?;

        let mut inserted = None;
        for _ in 0..TRACKING_ATTEMPTS {
            let tracking_number = self.db().generate_tracking_number().await?;
            let result = self
                .db()
                .conn()
                .execute(
                    &format!(
                        "INSERT INTO consignments ({SELECT_COLS})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, NULL, NULL, ?10, ?11)"
                    ),
                    libsql::params_from_iter(vec![
                        libsql::Value::from(id.as_str()),
                        tracking_number.as_str().into(),
                        new.origin_branch_id.as_str().into(),
                        new.destination_branch_id.as_str().into(),
                        sender_name.as_str().into(),
                        receiver_name.as_str().into(),
                        opt_text(new.description.as_deref()),
                        opt_real(new.weight_kg),
                        ConsignmentStatus::Pending.as_str().into(),
                        fmt_datetime(&now).into(),
                        fmt_datetime(&now).into(),
                    ]),
                )
                .await;
            match result {
                Ok(_) => {
                    inserted = Some(tracking_number);
                    break;
                }
                Err(e) if is_unique_violation(&e) => {
                    tracing::warn!(%tracking_number, "tracking number collision; retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
        let tracking_number = inserted.ok_or_else(|| {
            DatabaseError::InvalidState("could not allocate a unique tracking number".into())
        })?;

        let consignment = Consignment {
            id: id.clone(),
            tracking_number,
            origin_branch_id: new.origin_branch_id.clone(),
            destination_branch_id: new.destination_branch_id.clone(),
            sender_name,
            receiver_name,
            description: new.description.clone(),
            weight_kg: new.weight_kg,
            status: ConsignmentStatus::Pending,
            truck_id: None,
            dispatched_at: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        };

        self.log_activity(
            ActivityAction::Created,
            EntityType::Consignment,
            Some(&id),
            actor,
            format!("New consignment {} created", consignment.tracking_number),
        )
        .await?;

        Ok(consignment)
    }

    pub async fn get_consignment(&self, id: &str) -> Result<Consignment, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM consignments WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("Consignment", id))?;
        row_to_consignment(&row)
    }

    /// Look up by tracking number, case-insensitively.
    pub async fn get_consignment_by_tracking(
        &self,
        tracking_number: &str,
    ) -> Result<Consignment, DatabaseError> {
        let normalized = tracking_number.trim().to_uppercase();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM consignments WHERE tracking_number = ?1"),
                [normalized.as_str()],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("Consignment", normalized.clone()))?;
        row_to_consignment(&row)
    }

    /// Newest first, optionally filtered by status.
    pub async fn list_consignments(
        &self,
        status: Option<ConsignmentStatus>,
    ) -> Result<Vec<Consignment>, DatabaseError> {
        let (where_clause, params): (&str, Vec<libsql::Value>) = match status {
            Some(status) => ("WHERE status = ?1", vec![status.as_str().into()]),
            None => ("", Vec::new()),
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM consignments {where_clause}
             ORDER BY created_at DESC, rowid DESC"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut consignments = Vec::new();
        while let Some(row) = rows.next().await? {
            consignments.push(row_to_consignment(&row)?);
        }
        Ok(consignments)
    }

    /// Partial update. A status change is logged as `status_changed` and
    /// stamps `dispatched_at`/`delivered_at` when they are still empty.
    ///
    /// Moving a dispatched consignment to any other status frees its truck;
    /// moving it to `pending` also detaches the truck.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the status changed underneath this update.
    pub async fn update_consignment(
        &self,
        id: &str,
        update: &ConsignmentUpdate,
        actor: Option<&str>,
    ) -> Result<Consignment, DatabaseError> {
        let current = self.get_consignment(id).await?;
        let now = Utc::now();

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref origin) = update.origin_branch_id {
            self.require_branch(origin, "originBranchId").await?;
            sets.push(format!("origin_branch_id = ?{idx}"));
            params.push(origin.clone().into());
            idx += 1;
        }
        if let Some(ref destination) = update.destination_branch_id {
            self.require_branch(destination, "destinationBranchId")
                .await?;
            sets.push(format!("destination_branch_id = ?{idx}"));
            params.push(destination.clone().into());
            idx += 1;
        }
        if let Some(ref sender) = update.sender_name {
            sets.push(format!("sender_name = ?{idx}"));
            params.push(require_text(sender, "senderName")?.into());
            idx += 1;
        }
        if let Some(ref receiver) = update.receiver_name {
            sets.push(format!("receiver_name = ?{idx}"));
            params.push(require_text(receiver, "receiverName")?.into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(opt_text(description.as_deref()));
            idx += 1;
        }
        if let Some(weight_kg) = update.weight_kg {
            sets.push(format!("weight_kg = ?{idx}"));
            params.push(opt_real(weight_kg));
            idx += 1;
        }
        if let Some(ref truck_id) = update.truck_id {
            if let Some(truck_id) = truck_id {
                self.require_truck(truck_id, "truckId").await?;
            }
            sets.push(format!("truck_id = ?{idx}"));
            params.push(opt_text(truck_id.as_deref()));
            idx += 1;
        }
        let status_change = update.status.filter(|s| *s != current.status);
        if let Some(status) = status_change {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
            let stamp_column = match status {
                ConsignmentStatus::Dispatched if current.dispatched_at.is_none() => {
                    Some("dispatched_at")
                }
                ConsignmentStatus::Delivered if current.delivered_at.is_none() => {
                    Some("delivered_at")
                }
                _ => None,
            };
            if let Some(column) = stamp_column {
                sets.push(format!("{column} = ?{idx}"));
                params.push(fmt_datetime(&now).into());
                idx += 1;
            }
            // Back to pending undoes the dispatch unless a truck was given explicitly.
            if status == ConsignmentStatus::Pending
                && current.status == ConsignmentStatus::Dispatched
                && update.truck_id.is_none()
            {
                sets.push("truck_id = NULL".to_string());
                sets.push("dispatched_at = NULL".to_string());
            }
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(fmt_datetime(&now).into());
        idx += 1;

        params.push(id.into());
        let mut sql = format!(
            "UPDATE consignments SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        // A status change only applies to the status it was computed from.
        if status_change.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND status = ?{idx}"));
            params.push(current.status.as_str().into());
        }
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::InvalidState(format!(
                "Consignment {} changed status concurrently; retry the update",
                current.tracking_number
            )));
        }

        let leaves_dispatch = current.status == ConsignmentStatus::Dispatched
            && status_change.is_some_and(|status| status != ConsignmentStatus::Dispatched);
        if leaves_dispatch && let Some(ref truck_id) = current.truck_id {
            self.set_truck_availability(truck_id, true).await?;
        }

        let updated = self.get_consignment(id).await?;
        let (action, details) = match status_change {
            Some(status) => (
                ActivityAction::StatusChanged,
                format!(
                    "Consignment {} status changed from {} to {status}",
                    updated.tracking_number, current.status
                ),
            ),
            None => (
                ActivityAction::Updated,
                format!("Consignment {} updated", updated.tracking_number),
            ),
        };
        self.log_activity(
            action,
            EntityType::Consignment,
            Some(id),
            actor,
            details,
        )
        .await?;
        Ok(updated)
    }

    /// Delete a consignment. A dispatched one frees its truck first.
    pub async fn delete_consignment(
        &self,
        id: &str,
        actor: Option<&str>,
    ) -> Result<Consignment, DatabaseError> {
        let consignment = self.get_consignment(id).await?;

        self.db()
            .conn()
            .execute("DELETE FROM consignments WHERE id = ?1", [id])
            .await?;

        if consignment.status == ConsignmentStatus::Dispatched
            && let Some(ref truck_id) = consignment.truck_id
        {
            self.set_truck_availability(truck_id, true).await?;
        }

        self.log_activity(
            ActivityAction::Deleted,
            EntityType::Consignment,
            Some(id),
            actor,
            format!("Consignment {} deleted", consignment.tracking_number),
        )
        .await?;
        Ok(consignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::activity::ActivityFilter;
    use crate::test_support::{seed_branch, seed_consignment, seed_truck, test_service};
    use pretty_assertions::assert_eq;
    use tcc_core::requests::ConsignmentUpdateBuilder;

    #[tokio::test]
    async fn create_consignment_is_pending_and_logged() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "Pune").await;
        let b = seed_branch(&svc, "Delhi").await;

        let c = seed_consignment(&svc, &a.id, &b.id).await;
        assert!(c.id.starts_with("cns-"));
        assert!(c.tracking_number.starts_with("TCC-"));
        assert_eq!(c.status, ConsignmentStatus::Pending);
        assert_eq!(svc.get_consignment(&c.id).await.unwrap(), c);

        let log = svc
            .list_activity(&ActivityFilter {
                entity: Some(EntityType::Consignment),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].entity_id.as_deref(), Some(c.id.as_str()));
        assert_eq!(
            log[0].details,
            format!("New consignment {} created", c.tracking_number)
        );
    }

    #[tokio::test]
    async fn unknown_branch_rejected() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "Pune").await;
        let err = svc
            .create_consignment(
                &NewConsignment {
                    origin_branch_id: a.id.clone(),
                    destination_branch_id: "brn-00000000".into(),
                    sender_name: "S".into(),
                    receiver_name: "R".into(),
                    description: None,
                    weight_kg: None,
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidReference(ref m) if m.contains("destinationBranchId")));
    }

    #[tokio::test]
    async fn track_by_number_case_insensitive() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "A").await;
        let c = seed_consignment(&svc, &a.id, &a.id).await;
        let found = svc
            .get_consignment_by_tracking(&c.tracking_number.to_lowercase())
            .await
            .unwrap();
        assert_eq!(found.id, c.id);
        assert!(matches!(
            svc.get_consignment_by_tracking("TCC-00000000").await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn status_set_directly_without_transition_rules() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "A").await;
        let c = seed_consignment(&svc, &a.id, &a.id).await;

        // pending -> delivered skips dispatched entirely.
        let update = ConsignmentUpdateBuilder::new()
            .status(ConsignmentStatus::Delivered)
            .build();
        let delivered = svc.update_consignment(&c.id, &update, None).await.unwrap();
        assert_eq!(delivered.status, ConsignmentStatus::Delivered);
        assert!(delivered.delivered_at.is_some());

        // and back again.
        let update = ConsignmentUpdateBuilder::new()
            .status(ConsignmentStatus::Pending)
            .build();
        let pending = svc.update_consignment(&c.id, &update, None).await.unwrap();
        assert_eq!(pending.status, ConsignmentStatus::Pending);

        let changes = svc
            .count_activity(&ActivityFilter {
                action: Some(ActivityAction::StatusChanged),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(changes, 2);
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "A").await;
        let first = seed_consignment(&svc, &a.id, &a.id).await;
        seed_consignment(&svc, &a.id, &a.id).await;
        svc.update_consignment(
            &first.id,
            &ConsignmentUpdateBuilder::new()
                .status(ConsignmentStatus::Dispatched)
                .build(),
            None,
        )
        .await
        .unwrap();

        assert_eq!(svc.list_consignments(None).await.unwrap().len(), 2);
        let dispatched = svc
            .list_consignments(Some(ConsignmentStatus::Dispatched))
            .await
            .unwrap();
        assert_eq!(dispatched.len(), 1);
        assert_eq!(dispatched[0].id, first.id);
    }

    #[tokio::test]
    async fn update_fields_and_clear_optional() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "A").await;
        let b = seed_branch(&svc, "B").await;
        let truck = seed_truck(&svc, "T1", None).await;
        let c = seed_consignment(&svc, &a.id, &a.id).await;

        let update = ConsignmentUpdateBuilder::new()
            .destination_branch_id(b.id.clone())
            .weight_kg(None)
            .description(Some("fragile".into()))
            .truck_id(Some(truck.id.clone()))
            .build();
        let updated = svc.update_consignment(&c.id, &update, None).await.unwrap();
        assert_eq!(updated.destination_branch_id, b.id);
        assert!(updated.weight_kg.is_none());
        assert_eq!(updated.description.as_deref(), Some("fragile"));
        assert_eq!(updated.truck_id.as_deref(), Some(truck.id.as_str()));

        let bad = ConsignmentUpdateBuilder::new()
            .truck_id(Some("trk-00000000".into()))
            .build();
        assert!(matches!(
            svc.update_consignment(&c.id, &bad, None).await,
            Err(DatabaseError::InvalidReference(_))
        ));
    }

    #[tokio::test]
    async fn delete_consignment() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "A").await;
        let c = seed_consignment(&svc, &a.id, &a.id).await;
        svc.delete_consignment(&c.id, None).await.unwrap();
        assert!(matches!(
            svc.get_consignment(&c.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    async fn dispatched_on_new_truck(svc: &TccService) -> (Consignment, String) {
        let a = seed_branch(svc, "Depot").await;
        let truck = seed_truck(svc, "MH14XY0001", Some(&a.id)).await;
        let c = seed_consignment(svc, &a.id, &a.id).await;
        let request = tcc_core::requests::DispatchRequest {
            consignment_id: c.id.clone(),
            truck_id: truck.id.clone(),
        };
        let dispatched = svc.dispatch(&request, None).await.unwrap();
        (dispatched, truck.id)
    }

    #[tokio::test]
    async fn status_set_to_delivered_frees_the_truck() {
        let svc = test_service().await;
        let (c, truck_id) = dispatched_on_new_truck(&svc).await;
        assert_eq!(svc.dashboard_stats(5).await.unwrap().available_trucks, 0);

        let update = ConsignmentUpdateBuilder::new()
            .status(ConsignmentStatus::Delivered)
            .build();
        let updated = svc.update_consignment(&c.id, &update, None).await.unwrap();
        assert_eq!(updated.status, ConsignmentStatus::Delivered);
        assert_eq!(updated.truck_id.as_deref(), Some(truck_id.as_str()));
        assert!(svc.get_truck(&truck_id).await.unwrap().is_available);
        assert_eq!(svc.dashboard_stats(5).await.unwrap().available_trucks, 1);
    }

    #[tokio::test]
    async fn status_set_back_to_pending_detaches_the_truck() {
        let svc = test_service().await;
        let (c, truck_id) = dispatched_on_new_truck(&svc).await;

        let update = ConsignmentUpdateBuilder::new()
            .status(ConsignmentStatus::Pending)
            .build();
        let updated = svc.update_consignment(&c.id, &update, None).await.unwrap();
        assert_eq!(updated.status, ConsignmentStatus::Pending);
        assert!(updated.truck_id.is_none());
        assert!(updated.dispatched_at.is_none());
        assert!(svc.get_truck(&truck_id).await.unwrap().is_available);

        // The truck can go out again.
        let again = tcc_core::requests::DispatchRequest {
            consignment_id: c.id.clone(),
            truck_id: truck_id.clone(),
        };
        assert_eq!(
            svc.dispatch(&again, None).await.unwrap().status,
            ConsignmentStatus::Dispatched
        );
    }

    #[tokio::test]
    async fn non_status_edit_keeps_truck_in_use() {
        let svc = test_service().await;
        let (c, truck_id) = dispatched_on_new_truck(&svc).await;

        let update = ConsignmentUpdateBuilder::new()
            .receiver_name("New Receiver")
            .build();
        svc.update_consignment(&c.id, &update, None).await.unwrap();
        assert!(!svc.get_truck(&truck_id).await.unwrap().is_available);
    }
}
