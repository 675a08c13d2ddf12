//! # tcc-config
//!
//! Layered configuration for the TCC server, client and CLI using figment.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. User-level `~/.config/tcc/config.toml`
//! 3. Project-level `./tcc.toml`
//! 4. Legacy bare variables: `PORT` → `server.port`, `MONGO_URI` → `database.url`
//! 5. `TCC_*` environment variables, `__` separating sections
//!
//! `TCC_AUTH__JWT_SECRET` maps to `auth.jwt_secret`, `TCC_CLIENT__BASE_URL`
//! to `client.base_url`, and so on.
//!
//! ```no_run
//! use tcc_config::TccConfig;
//!
//! let config = TccConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod auth;
mod client;
mod database;
mod error;
mod general;
mod server;

pub use auth::AuthConfig;
pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project-level config file.
pub const LOCAL_CONFIG_FILE: &str = "tcc.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TCC_";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TccConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TccConfig {
    /// Load from TOML files and the environment. Does not read `.env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse, and
    /// [`ConfigError::InvalidValue`] when the merged values are inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load) but reads `.env` first.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Load with an explicit TOML file layered over the usual files and
    /// under the environment. Used by the `--config` CLI flag.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let figment = Self::base_figment()
            .merge(Toml::file(path))
            .merge(Self::legacy_env())
            .merge(Self::prefixed_env());
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// The full provider chain. Public so tests can extract from it directly.
    #[must_use]
    pub fn figment() -> Figment {
        Self::base_figment()
            .merge(Self::legacy_env())
            .merge(Self::prefixed_env())
    }

    fn base_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    /// Bare `PORT` and `MONGO_URI`, as set by existing deployments.
    fn legacy_env() -> Env {
        Env::raw().only(&["PORT", "MONGO_URI"]).map(|key| {
            if key.as_str().eq_ignore_ascii_case("port") {
                "server.port".into()
            } else {
                "database.url".into()
            }
        })
    }

    fn prefixed_env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tcc").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_activity_limit > self.general.max_activity_limit {
            return Err(ConfigError::InvalidValue {
                field: "general.default_activity_limit".into(),
                reason: format!(
                    "{} exceeds general.max_activity_limit ({})",
                    self.general.default_activity_limit, self.general.max_activity_limit
                ),
            });
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "auth.bcrypt_cost".into(),
                reason: format!("{} is outside 4..=31", self.auth.bcrypt_cost),
            });
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Walk up from `CARGO_MANIFEST_DIR` (at most 3 levels) looking for
    /// `.env`, then fall back to the current directory. Missing files are
    /// ignored.
    fn load_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TccConfig::default();
        assert_eq!(config.server.port, 5000);
        assert!(!config.auth.has_secret());
        assert_eq!(config.client.storage_key, "user_token");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: TccConfig = TccConfig::figment().extract()?;
            assert_eq!(config.general.default_activity_limit, 10);
            assert_eq!(config.database.url, "tcc.db");
            Ok(())
        });
    }

    #[test]
    fn inconsistent_limits_rejected() {
        let mut config = TccConfig::default();
        config.general.default_activity_limit = 500;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_activity_limit"));
    }

    #[test]
    fn bcrypt_cost_bounds() {
        let mut config = TccConfig::default();
        config.auth.bcrypt_cost = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
