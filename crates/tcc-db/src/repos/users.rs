//! User repository.
//!
//! Emails are stored trimmed and lowercased; lookups are case-insensitive.
//! Password hashes are produced by the caller and only leave this module
//! through [`UserCredentials`].

use chrono::Utc;
use tcc_core::entities::User;
use tcc_core::enums::{ActivityAction, EntityType, Role};
use tcc_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, is_unique_violation, parse_datetime, parse_enum};
use crate::service::TccService;

const SELECT_COLS: &str = "id, name, email, role, created_at";

/// A user together with the stored bcrypt hash, for login checks.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl TccService {
    /// Insert a user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the email is taken.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        actor: Option<&str>,
    ) -> Result<User, DatabaseError> {
        let email = normalize_email(email);
        if self.find_user_by_email(&email).await?.is_some() {
            return Err(DatabaseError::Conflict(format!(
                "User with email {email} already exists"
            )));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, name, email, password_hash, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    name.trim(),
                    email.as_str(),
                    password_hash,
                    role.as_str(),
                    fmt_datetime(&now)
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::Conflict(format!("User with email {email} already exists"))
                } else {
                    e.into()
                }
            })?;

        let user = User {
            id: id.clone(),
            name: name.trim().to_string(),
            email,
            role,
            created_at: now,
        };

        self.log_activity(
            ActivityAction::Created,
            EntityType::User,
            Some(&id),
            actor.or(Some(id.as_str())),
            format!("New {} account {} created", user.role, user.email),
        )
        .await?;

        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", id))?;
        row_to_user(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .find_credentials(email)
            .await?
            .map(|credentials| credentials.user))
    }

    /// User plus stored hash for `email`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS}, password_hash FROM users WHERE email = ?1"),
                [normalize_email(email)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(UserCredentials {
                user: row_to_user(&row)?,
                password_hash: row.get(5)?,
            })),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users ORDER BY created_at DESC, rowid DESC"),
                (),
            )
            .await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_admins(&self) -> Result<u64, DatabaseError> {
        self.count(
            "SELECT COUNT(*) FROM users WHERE role = ?1",
            vec![Role::Admin.as_str().into()],
        )
        .await
    }

    /// Delete a user. The last remaining admin cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id and
    /// `DatabaseError::InvalidState` for the last admin.
    pub async fn delete_user(&self, id: &str, actor: Option<&str>) -> Result<User, DatabaseError> {
        let user = self.get_user(id).await?;
        if user.role == Role::Admin && self.count_admins().await? <= 1 {
            return Err(DatabaseError::InvalidState(
                "Cannot delete the last admin account".into(),
            ));
        }

        self.db()
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", [id])
            .await?;

        self.log_activity(
            ActivityAction::Deleted,
            EntityType::User,
            Some(id),
            actor,
            format!("User {} deleted", user.email),
        )
        .await?;
        Ok(user)
    }

    /// Record a successful sign-in.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_login(&self, user: &User) -> Result<(), DatabaseError> {
        self.log_activity(
            ActivityAction::Login,
            EntityType::User,
            Some(&user.id),
            Some(&user.id),
            format!("{} logged in", user.email),
        )
        .await?;
        Ok(())
    }
}
