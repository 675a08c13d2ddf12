use tcc_auth::password::hash_password;
use tcc_config::AuthConfig;
use tcc_core::entities::User;
use tcc_core::enums::Role;
use tcc_db::service::TccService;

/// Seed the configured admin account when the database has no admin yet.
///
/// Returns the created user, or `None` when nothing was seeded.
///
/// # Errors
///
/// Fails if hashing or the insert fails.
pub async fn ensure_bootstrap_admin(
    service: &TccService,
    auth: &AuthConfig,
) -> anyhow::Result<Option<User>> {
    if !auth.has_bootstrap_admin() {
        return Ok(None);
    }
    if service.count_admins().await? > 0 {
        tracing::debug!("admin account present; bootstrap skipped");
        return Ok(None);
    }
    if let Some(existing) = service.find_user_by_email(&auth.bootstrap_admin_email).await? {
        tracing::warn!(
            email = %existing.email,
            "bootstrap admin email belongs to a non-admin account; not seeding"
        );
        return Ok(None);
    }

    let password = auth.bootstrap_admin_password.clone();
    let cost = auth.bcrypt_cost;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;
    let admin = service
        .create_user(
            "Administrator",
            &auth.bootstrap_admin_email,
            &hash,
            Role::Admin,
            None,
        )
        .await?;
    tracing::info!(email = %admin.email, "bootstrap admin created");
    Ok(Some(admin))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            bcrypt_cost: 4,
            bootstrap_admin_email: "root@tcc.local".into(),
            bootstrap_admin_password: "changeme".into(),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn seeds_once() {
        let service = TccService::in_memory().await.unwrap();
        let config = auth_config();

        let admin = ensure_bootstrap_admin(&service, &config).await.unwrap();
        assert_eq!(admin.unwrap().role, Role::Admin);
        assert!(ensure_bootstrap_admin(&service, &config).await.unwrap().is_none());
        assert_eq!(service.count_admins().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unconfigured_is_a_no_op() {
        let service = TccService::in_memory().await.unwrap();
        let seeded = ensure_bootstrap_admin(&service, &AuthConfig::default())
            .await
            .unwrap();
        assert!(seeded.is_none());
    }
}
