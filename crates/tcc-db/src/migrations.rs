//! Embedded schema migrations, run on every open.

use crate::TccDb;
use crate::error::DatabaseError;

/// Users, branches, trucks, consignments, activity log and their indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl TccDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
