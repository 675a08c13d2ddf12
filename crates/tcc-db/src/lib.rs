//! # tcc-db
//!
//! libSQL persistence for TCC: users, branches, trucks, consignments and the
//! activity log, plus dispatch workflow, dashboard counts and reports.
//!
//! [`TccDb`] owns the connection; [`service::TccService`] wraps it and hosts
//! every repository method (one `impl TccService` block per file under
//! [`repos`]). Every mutation appends an activity log entry.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tcc_config::DatabaseConfig;

/// Database handle: one libSQL database and the connection all queries share.
pub struct TccDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TccDb {
    /// Open a local file, or `:memory:`. Runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::from_database(db).await
    }

    /// Open a remote libSQL database. Runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::from_database(db).await
    }

    /// Open whatever `[database]` config points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for a remote URL without a token,
    /// otherwise as [`open_local`](Self::open_local) / [`open_remote`](Self::open_remote).
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            if !config.is_configured() {
                return Err(DatabaseError::InvalidState(
                    "database.url is remote but database.auth_token is empty".into(),
                ));
            }
            tracing::info!(url = %config.url, "opening remote database");
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            tracing::info!(path, "opening local database");
            Self::open_local(path).await
        }
    }

    async fn from_database(db: libsql::Database) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let tcc_db = Self { db, conn };
        tcc_db.run_migrations().await?;
        Ok(tcc_db)
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL, e.g. `"cns-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Generate a tracking number, e.g. `"TCC-1A2B3C4D"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_tracking_number(&self) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT '{}-' || upper(hex(randomblob(4)))",
                    tcc_core::ids::TRACKING_PREFIX
                ),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
