//! Activity log repository.
//!
//! Append-only entries recording every mutation, newest first on read.

use chrono::Utc;
use tcc_core::entities::ActivityLog;
use tcc_core::enums::{ActivityAction, EntityType};
use tcc_core::ids::PREFIX_ACTIVITY;

use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_opt_string, parse_datetime, parse_enum};
use crate::service::TccService;

const SELECT_COLS: &str = "id, action, entity, entity_id, user_id, details, created_at";

/// Used when a filter carries no limit.
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;

/// Filter criteria for activity queries.
#[derive(Debug, Default, Clone)]
pub struct ActivityFilter {
    pub entity: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<ActivityAction>,
    pub user_id: Option<String>,
    pub limit: Option<u32>,
}

fn row_to_activity(row: &libsql::Row) -> Result<ActivityLog, DatabaseError> {
    Ok(ActivityLog {
        id: row.get(0)?,
        action: parse_enum(&row.get::<String>(1)?)?,
        entity: parse_enum(&row.get::<String>(2)?)?,
        entity_id: get_opt_string(row, 3)?,
        user_id: get_opt_string(row, 4)?,
        details: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl TccService {
    /// Append an activity entry. Called by every mutation method.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn log_activity(
        &self,
        action: ActivityAction,
        entity: EntityType,
        entity_id: Option<&str>,
        actor: Option<&str>,
        details: impl Into<String>,
    ) -> Result<ActivityLog, DatabaseError> {
        let entry = ActivityLog {
            id: self.db().generate_id(PREFIX_ACTIVITY).await?,
            action,
            entity,
            entity_id: entity_id.map(String::from),
            user_id: actor.map(String::from),
            details: details.into(),
            created_at: Utc::now(),
        };

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO activity_log ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params![
                    entry.id.as_str(),
                    entry.action.as_str(),
                    entry.entity.as_str(),
                    entry.entity_id.as_deref(),
                    entry.user_id.as_deref(),
                    entry.details.as_str(),
                    fmt_datetime(&entry.created_at)
                ],
            )
            .await?;

        tracing::debug!(
            action = %entry.action,
            entity = %entry.entity,
            entity_id = ?entry.entity_id,
            "activity recorded"
        );
        Ok(entry)
    }

    /// Most recent entries matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_activity(
        &self,
        filter: &ActivityFilter,
    ) -> Result<Vec<ActivityLog>, DatabaseError> {
        let (where_clause, params) = where_clause(filter);
        let limit = filter.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM activity_log {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_activity(&row)?);
        }
        Ok(entries)
    }

    /// Count entries matching `filter`, ignoring its limit.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_activity(&self, filter: &ActivityFilter) -> Result<u64, DatabaseError> {
        let (where_clause, params) = where_clause(filter);
        self.count(
            &format!("SELECT COUNT(*) FROM activity_log {where_clause}"),
            params,
        )
        .await
    }
}

fn where_clause(filter: &ActivityFilter) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(entity) = filter.entity {
        params.push(entity.as_str().into());
        conditions.push(format!("entity = ?{}", params.len()));
    }
    if let Some(ref entity_id) = filter.entity_id {
        params.push(entity_id.clone().into());
        conditions.push(format!("entity_id = ?{}", params.len()));
    }
    if let Some(action) = filter.action {
        params.push(action.as_str().into());
        conditions.push(format!("action = ?{}", params.len()));
    }
    if let Some(ref user_id) = filter.user_id {
        params.push(user_id.clone().into());
        conditions.push(format!("user_id = ?{}", params.len()));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn log_and_list_newest_first() {
        let svc = test_service().await;
        for i in 0..3 {
            svc.log_activity(
                ActivityAction::Created,
                EntityType::Branch,
                Some(&format!("brn-0000000{i}")),
                None,
                format!("entry {i}"),
            )
            .await
            .unwrap();
        }

        let entries = svc.list_activity(&ActivityFilter::default()).await.unwrap();
        let details: Vec<_> = entries.iter().map(|e| e.details.as_str()).collect();
        assert_eq!(details, vec!["entry 2", "entry 1", "entry 0"]);
    }

    #[tokio::test]
    async fn limit_is_applied() {
        let svc = test_service().await;
        for i in 0..15 {
            svc.log_activity(
                ActivityAction::Updated,
                EntityType::Truck,
                None,
                None,
                format!("n{i}"),
            )
            .await
            .unwrap();
        }

        let default = svc.list_activity(&ActivityFilter::default()).await.unwrap();
        assert_eq!(default.len(), DEFAULT_ACTIVITY_LIMIT as usize);

        let five = svc
            .list_activity(&ActivityFilter {
                limit: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(five.len(), 5);
        assert_eq!(five[0].details, "n14");
        assert_eq!(
            svc.count_activity(&ActivityFilter::default()).await.unwrap(),
            15
        );
    }

    #[tokio::test]
    async fn filter_by_entity_and_actor() {
        let svc = test_service().await;
        svc.log_activity(
            ActivityAction::Created,
            EntityType::Truck,
            None,
            Some("usr-00000001"),
            "t",
        )
        .await
        .unwrap();
        svc.log_activity(
            ActivityAction::Created,
            EntityType::Branch,
            None,
            Some("usr-00000002"),
            "b",
        )
        .await
        .unwrap();

        let trucks = svc
            .list_activity(&ActivityFilter {
                entity: Some(EntityType::Truck),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(trucks.len(), 1);
        assert_eq!(trucks[0].user_id.as_deref(), Some("usr-00000001"));

        let by_actor = svc
            .count_activity(&ActivityFilter {
                user_id: Some("usr-00000002".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_actor, 1);
    }
}
