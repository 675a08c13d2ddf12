//! Service layer over [`TccDb`].
//!
//! All repository methods are `impl TccService` blocks in [`crate::repos`].
//! Each mutation runs its statements in sequence on the shared connection and
//! then appends an activity entry. There is no cross-statement transaction;
//! each statement is atomic on its own, and state transitions are guarded by
//! `WHERE` conditions on the state they were checked against.

use tcc_config::DatabaseConfig;

use crate::TccDb;
use crate::error::DatabaseError;
use crate::helpers::get_count;

pub struct TccService {
    db: TccDb,
}

impl TccService {
    /// Open the configured database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(TccDb::open(config).await?))
    }

    /// In-memory database, used by tests across the workspace.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if migrations fail.
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::from_db(TccDb::open_local(":memory:").await?))
    }

    #[must_use]
    pub const fn from_db(db: TccDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &TccDb {
        &self.db
    }

    /// Run a single-column `COUNT(*)` query.
    pub(crate) async fn count(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    /// Whether a row with `id` exists in `table`.
    pub(crate) async fn exists(&self, table: &str, id: &str) -> Result<bool, DatabaseError> {
        let n = self
            .count(
                &format!("SELECT COUNT(*) FROM {table} WHERE id = ?1"),
                vec![id.into()],
            )
            .await?;
        Ok(n > 0)
    }
}
