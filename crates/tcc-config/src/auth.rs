//! Token signing and password hashing settings.

use serde::{Deserialize, Serialize};

const fn default_token_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_issuer() -> String {
    "tcc".to_string()
}

const fn default_bcrypt_cost() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// HS256 signing secret. When empty the server generates a per-process
    /// secret and tokens stop validating after a restart.
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    /// Value written to and required in the `iss` claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Admin account seeded at start-up when no admin exists.
    #[serde(default)]
    pub bootstrap_admin_email: String,

    #[serde(default)]
    pub bootstrap_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
            issuer: default_issuer(),
            bcrypt_cost: default_bcrypt_cost(),
            bootstrap_admin_email: String::new(),
            bootstrap_admin_password: String::new(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    #[must_use]
    pub fn has_bootstrap_admin(&self) -> bool {
        !self.bootstrap_admin_email.is_empty() && !self.bootstrap_admin_password.is_empty()
    }
}
