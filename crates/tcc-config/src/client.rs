//! Settings for the API client and its local token storage.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_storage_key() -> String {
    "user_token".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root including the `/api` segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// File name of the stored token inside `credentials_dir`.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for stored tokens. Empty means `~/.tcc`.
    #[serde(default)]
    pub credentials_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage_key: default_storage_key(),
            credentials_dir: String::new(),
        }
    }
}

impl ClientConfig {
    /// Resolved credentials directory, or `None` when no home directory exists.
    #[must_use]
    pub fn credentials_path(&self) -> Option<PathBuf> {
        if self.credentials_dir.is_empty() {
            dirs::home_dir().map(|home| home.join(".tcc"))
        } else {
            Some(PathBuf::from(&self.credentials_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.storage_key, "user_token");
    }

    #[test]
    fn explicit_credentials_dir_wins() {
        let config = ClientConfig {
            credentials_dir: "/tmp/tcc-creds".into(),
            ..Default::default()
        };
        assert_eq!(
            config.credentials_path(),
            Some(PathBuf::from("/tmp/tcc-creds"))
        );
    }
}
