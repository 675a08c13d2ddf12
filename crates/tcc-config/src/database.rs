//! libSQL connection settings.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "tcc.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Local file path, `:memory:`, or a remote `libsql://` / `https://` URL.
    /// Also settable through the bare `MONGO_URI` variable.
    #[serde(default = "default_url")]
    pub url: String,

    /// Auth token for remote databases.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_remote(&self) -> bool {
        ["libsql://", "https://", "http://", "wss://", "ws://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }

    /// Remote databases need a token; local ones only need a path.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        if self.is_remote() {
            !self.auth_token.is_empty()
        } else {
            !self.url.is_empty()
        }
    }
}
