//! Branch repository.

use chrono::Utc;
use tcc_core::entities::Branch;
use tcc_core::enums::{ActivityAction, EntityType};
use tcc_core::ids::PREFIX_BRANCH;
use tcc_core::requests::{BranchUpdate, NewBranch};

use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, parse_datetime};
use crate::service::TccService;

const SELECT_COLS: &str = "id, name, location, created_at, updated_at";

fn row_to_branch(row: &libsql::Row) -> Result<Branch, DatabaseError> {
    Ok(Branch {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl TccService {
    pub async fn create_branch(
        &self,
        new: &NewBranch,
        actor: Option<&str>,
    ) -> Result<Branch, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_BRANCH).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO branches ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    id.as_str(),
                    new.name.trim(),
                    new.location.trim(),
                    fmt_datetime(&now),
                    fmt_datetime(&now)
                ],
            )
            .await?;

        let branch = Branch {
            id: id.clone(),
            name: new.name.trim().to_string(),
            location: new.location.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.log_activity(
            ActivityAction::Created,
            EntityType::Branch,
            Some(&id),
            actor,
            format!("New branch {} created", branch.name),
        )
        .await?;

        Ok(branch)
    }

    pub async fn get_branch(&self, id: &str) -> Result<Branch, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM branches WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("Branch", id))?;
        row_to_branch(&row)
    }

    pub async fn list_branches(&self) -> Result<Vec<Branch>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM branches ORDER BY name COLLATE NOCASE, id"),
                (),
            )
            .await?;
        let mut branches = Vec::new();
        while let Some(row) = rows.next().await? {
            branches.push(row_to_branch(&row)?);
        }
        Ok(branches)
    }

    pub async fn update_branch(
        &self,
        id: &str,
        update: &BranchUpdate,
        actor: Option<&str>,
    ) -> Result<Branch, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.trim().into());
            idx += 1;
        }
        if let Some(ref location) = update.location {
            sets.push(format!("location = ?{idx}"));
            params.push(location.trim().into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_branch(id).await;
        }

        let now = Utc::now();
        sets.push(format!("updated_at = ?{idx}"));
        params.push(fmt_datetime(&now).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE branches SET {} WHERE id = ?{idx}", sets.join(", "));
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Branch", id));
        }

        let updated = self.get_branch(id).await?;
        self.log_activity(
            ActivityAction::Updated,
            EntityType::Branch,
            Some(id),
            actor,
            format!("Branch {} updated", updated.name),
        )
        .await?;
        Ok(updated)
    }

    /// Delete a branch. Trucks based there become unassigned; a branch that
    /// is the origin or destination of any consignment cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id and
    /// `DatabaseError::InvalidState` while consignments reference it.
    pub async fn delete_branch(
        &self,
        id: &str,
        actor: Option<&str>,
    ) -> Result<Branch, DatabaseError> {
        let branch = self.get_branch(id).await?;

        let referencing = self
            .count(
                "SELECT COUNT(*) FROM consignments
                 WHERE origin_branch_id = ?1 OR destination_branch_id = ?1",
                vec![id.into()],
            )
            .await?;
        if referencing > 0 {
            return Err(DatabaseError::InvalidState(format!(
                "Branch {} is referenced by {referencing} consignment(s)",
                branch.name
            )));
        }

        self.db()
            .conn()
            .execute("DELETE FROM branches WHERE id = ?1", [id])
            .await?;

        self.log_activity(
            ActivityAction::Deleted,
            EntityType::Branch,
            Some(id),
            actor,
            format!("Branch {} deleted", branch.name),
        )
        .await?;
        Ok(branch)
    }

    /// Fail with `InvalidReference` unless the branch exists.
    pub(crate) async fn require_branch(&self, id: &str, field: &str) -> Result<(), DatabaseError> {
        if self.exists("branches", id).await? {
            Ok(())
        } else {
            Err(DatabaseError::InvalidReference(format!(
                "{field} refers to unknown branch {id}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::activity::ActivityFilter;
    use crate::test_support::{seed_branch, seed_consignment, seed_truck, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_branch_roundtrip() {
        let svc = test_service().await;
        let branch = svc
            .create_branch(
                &NewBranch {
                    name: " Nagpur Hub ".into(),
                    location: "Nagpur, MH".into(),
                },
                Some("usr-00000001"),
            )
            .await
            .unwrap();
        assert!(branch.id.starts_with("brn-"));
        assert_eq!(branch.name, "Nagpur Hub");

        let fetched = svc.get_branch(&branch.id).await.unwrap();
        assert_eq!(fetched, branch);

        let log = svc.list_activity(&ActivityFilter::default()).await.unwrap();
        assert_eq!(log[0].details, "New branch Nagpur Hub created");
        assert_eq!(log[0].user_id.as_deref(), Some("usr-00000001"));
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let svc = test_service().await;
        seed_branch(&svc, "pune").await;
        seed_branch(&svc, "Agra").await;
        seed_branch(&svc, "Mumbai").await;
        let names: Vec<_> = svc
            .list_branches()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Agra", "Mumbai", "pune"]);
    }

    #[tokio::test]
    async fn partial_update() {
        let svc = test_service().await;
        let branch = seed_branch(&svc, "Old").await;
        let updated = svc
            .update_branch(
                &branch.id,
                &BranchUpdate {
                    name: Some("New".into()),
                    location: None,
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.location, branch.location);
        assert!(updated.updated_at >= branch.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .update_branch(
                "brn-deadbeef",
                &BranchUpdate {
                    name: Some("x".into()),
                    location: None,
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_unassigns_trucks() {
        let svc = test_service().await;
        let branch = seed_branch(&svc, "Closing").await;
        let truck = seed_truck(&svc, "MH01AA0001", Some(&branch.id)).await;

        svc.delete_branch(&branch.id, None).await.unwrap();
        assert!(matches!(
            svc.get_branch(&branch.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(svc.get_truck(&truck.id).await.unwrap().branch_id.is_none());
    }

    #[tokio::test]
    async fn delete_blocked_by_consignments() {
        let svc = test_service().await;
        let a = seed_branch(&svc, "A").await;
        let b = seed_branch(&svc, "B").await;
        seed_consignment(&svc, &a.id, &b.id).await;

        assert!(matches!(
            svc.delete_branch(&b.id, None).await,
            Err(DatabaseError::InvalidState(_))
        ));
    }
}
