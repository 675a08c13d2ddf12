//! Truck repository.

use chrono::Utc;
use tcc_core::entities::Truck;
use tcc_core::enums::{ActivityAction, EntityType};
use tcc_core::ids::PREFIX_TRUCK;
use tcc_core::requests::{NewTruck, TruckUpdate};

use crate::error::DatabaseError;
use crate::helpers::{
    fmt_datetime, get_bool, get_opt_f64, get_opt_string, is_unique_violation, opt_real, opt_text,
    parse_datetime,
};
use crate::service::TccService;

const SELECT_COLS: &str =
    "id, registration_number, branch_id, capacity_kg, is_available, created_at, updated_at";

/// Filters for `GET /api/trucks`.
#[derive(Debug, Default, Clone)]
pub struct TruckFilter {
    pub available: Option<bool>,
    pub branch_id: Option<String>,
}

fn row_to_truck(row: &libsql::Row) -> Result<Truck, DatabaseError> {
    Ok(Truck {
        id: row.get(0)?,
        registration_number: row.get(1)?,
        branch_id: get_opt_string(row, 2)?,
        capacity_kg: get_opt_f64(row, 3)?,
        is_available: get_bool(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn normalize_registration(registration: &str) -> String {
    registration.trim().to_uppercase()
}

fn duplicate_registration(registration: &str) -> DatabaseError {
    DatabaseError::Conflict(format!(
        "Truck with registration {registration} already exists"
    ))
}

impl TccService {
    pub async fn create_truck(
        &self,
        new: &NewTruck,
        actor: Option<&str>,
    ) -> Result<Truck, DatabaseError> {
        let registration = normalize_registration(&new.registration_number);
        if registration.is_empty() {
            return Err(DatabaseError::InvalidReference(
                "registrationNumber must not be empty".into(),
            ));
        }
        if let Some(ref branch_id) = new.branch_id {
            self.require_branch(branch_id, "branchId").await?;
        }
        if self.find_truck_by_registration(&registration).await?.is_some() {
            return Err(duplicate_registration(&registration));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TRUCK).await?;
        let is_available = new.is_available.unwrap_or(true);

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO trucks ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params_from_iter(vec![
                    libsql::Value::from(id.as_str()),
                    registration.as_str().into(),
                    opt_text(new.branch_id.as_deref()),
                    opt_real(new.capacity_kg),
                    i64::from(is_available).into(),
                    fmt_datetime(&now).into(),
                    fmt_datetime(&now).into(),
                ]),
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate_registration(&registration)
                } else {
                    e.into()
                }
            })?;

        let truck = Truck {
            id: id.clone(),
            registration_number: registration,
            branch_id: new.branch_id.clone(),
            capacity_kg: new.capacity_kg,
            is_available,
            created_at: now,
            updated_at: now,
        };

        self.log_activity(
            ActivityAction::Created,
            EntityType::Truck,
            Some(&id),
            actor,
            format!("New truck {} added", truck.registration_number),
        )
        .await?;

        Ok(truck)
    }

    pub async fn get_truck(&self, id: &str) -> Result<Truck, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM trucks WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("Truck", id))?;
        row_to_truck(&row)
    }

    pub async fn find_truck_by_registration(
        &self,
        registration: &str,
    ) -> Result<Option<Truck>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM trucks WHERE registration_number = ?1"),
                [normalize_registration(registration)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_truck(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_trucks(&self, filter: &TruckFilter) -> Result<Vec<Truck>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(available) = filter.available {
            params.push(i64::from(available).into());
            conditions.push(format!("is_available = ?{}", params.len()));
        }
        if let Some(ref branch_id) = filter.branch_id {
            params.push(branch_id.clone().into());
            conditions.push(format!("branch_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM trucks {where_clause} ORDER BY registration_number"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut trucks = Vec::new();
        while let Some(row) = rows.next().await? {
            trucks.push(row_to_truck(&row)?);
        }
        Ok(trucks)
    }

    pub async fn update_truck(
        &self,
        id: &str,
        update: &TruckUpdate,
        actor: Option<&str>,
    ) -> Result<Truck, DatabaseError> {
        let current = self.get_truck(id).await?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref registration) = update.registration_number {
            let registration = normalize_registration(registration);
            if let Some(other) = self.find_truck_by_registration(&registration).await?
                && other.id != id
            {
                return Err(duplicate_registration(&registration));
            }
            sets.push(format!("registration_number = ?{idx}"));
            params.push(registration.into());
            idx += 1;
        }
        if let Some(ref branch_id) = update.branch_id {
            if let Some(branch_id) = branch_id {
                self.require_branch(branch_id, "branchId").await?;
            }
            sets.push(format!("branch_id = ?{idx}"));
            params.push(opt_text(branch_id.as_deref()));
            idx += 1;
        }
        if let Some(capacity_kg) = update.capacity_kg {
            sets.push(format!("capacity_kg = ?{idx}"));
            params.push(opt_real(capacity_kg));
            idx += 1;
        }
        if let Some(is_available) = update.is_available {
            sets.push(format!("is_available = ?{idx}"));
            params.push(i64::from(is_available).into());
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(current);
        }

        let now = Utc::now();
        sets.push(format!("updated_at = ?{idx}"));
        params.push(fmt_datetime(&now).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE trucks SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        let updated = self.get_truck(id).await?;
        self.log_activity(
            ActivityAction::Updated,
            EntityType::Truck,
            Some(id),
            actor,
            format!("Truck {} updated", updated.registration_number),
        )
        .await?;
        Ok(updated)
    }

    /// Delete a truck. A truck carrying a dispatched consignment cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id and
    /// `DatabaseError::InvalidState` while it is on a dispatch.
    pub async fn delete_truck(&self, id: &str, actor: Option<&str>) -> Result<Truck, DatabaseError> {
        let truck = self.get_truck(id).await?;

        let in_transit = self
            .count(
                "SELECT COUNT(*) FROM consignments WHERE truck_id = ?1 AND status = 'dispatched'",
                vec![id.into()],
            )
            .await?;
        if in_transit > 0 {
            return Err(DatabaseError::InvalidState(format!(
                "Truck {} is on an active dispatch",
                truck.registration_number
            )));
        }

        self.db()
            .conn()
            .execute("DELETE FROM trucks WHERE id = ?1", [id])
            .await?;

        self.log_activity(
            ActivityAction::Deleted,
            EntityType::Truck,
            Some(id),
            actor,
            format!("Truck {} removed", truck.registration_number),
        )
        .await?;
        Ok(truck)
    }

    /// Fail with `InvalidReference` unless the truck exists.
    pub(crate) async fn require_truck(&self, id: &str, field: &str) -> Result<Truck, DatabaseError> {
        match self.get_truck(id).await {
            Err(DatabaseError::NotFound { .. }) => Err(DatabaseError::InvalidReference(format!(
                "{field} refers to unknown truck {id}"
            ))),
            other => other,
        }
    }

    pub(crate) async fn set_truck_availability(
        &self,
        id: &str,
        is_available: bool,
    ) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "UPDATE trucks SET is_available = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(is_available), fmt_datetime(&Utc::now()), id],
            )
            .await?;
        Ok(())
    }
}
