//! Local persistence of the client's access token.
//!
//! One file per storage key under the credentials directory (`~/.tcc/user_token`
//! by default), mode 0600 on Unix. `TCC_AUTH_TOKEN` takes priority over the
//! file when set, so CI can inject a token without touching disk.

use std::fs;
use std::path::{Path, PathBuf};

use tcc_config::ClientConfig;

use crate::error::AuthError;

/// Environment variable checked before the credentials file.
pub const TOKEN_ENV_VAR: &str = "TCC_AUTH_TOKEN";

/// Where a loaded token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: Option<PathBuf>,
    key: String,
    env_var: Option<String>,
}

impl TokenStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: Some(dir.into()),
            key: key.into(),
            env_var: Some(TOKEN_ENV_VAR.to_string()),
        }
    }

    /// Storage key and directory from `[client]` config.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            dir: config.credentials_path(),
            key: config.storage_key.clone(),
            env_var: Some(TOKEN_ENV_VAR.to_string()),
        }
    }

    /// Ignore the environment variable and use only the file.
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.env_var = None;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Path of the credentials file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] when no directory is configured
    /// and no home directory exists.
    pub fn path(&self) -> Result<PathBuf, AuthError> {
        self.dir
            .as_deref()
            .map(|dir| dir.join(&self.key))
            .ok_or_else(|| {
                AuthError::TokenStoreError("home directory not found; cannot store credentials".into())
            })
    }

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] if the file cannot be written.
    pub fn store(&self, token: &str) -> Result<(), AuthError> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            create_private_dir(parent)?;
        }
        fs::write(&path, token)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    /// Load the token. Priority: environment variable → file.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        self.load_with_source().map(|(token, _)| token)
    }

    #[must_use]
    pub fn load_with_source(&self) -> Option<(String, TokenSource)> {
        if let Some(token) = self.env_token() {
            return Some((token, TokenSource::Env));
        }
        self.load_file().map(|token| (token, TokenSource::File))
    }

    /// Remove the credentials file. A missing file is not an error.
    ///
    /// A token supplied through the environment cannot be removed here; the
    /// caller simply stops using it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        let path = self.path()?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn env_token(&self) -> Option<String> {
        let var = self.env_var.as_deref()?;
        std::env::var(var).ok().filter(|t| !t.trim().is_empty())
    }

    fn load_file(&self) -> Option<String> {
        let path = self.path().ok()?;
        fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

fn create_private_dir(dir: &Path) -> Result<(), AuthError> {
    fs::create_dir_all(dir)
        .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", dir.display())))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(dir, fs::Permissions::from_mode(0o700)) {
            tracing::warn!("failed to chmod 0700 {}: {e}", dir.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, TokenStore) {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::new(tmp.path().join("creds"), "user_token").without_env();
        (tmp, store)
    }

    #[test]
    fn path_uses_storage_key() {
        let (_tmp, store) = temp_store();
        assert!(store.path().unwrap().ends_with("creds/user_token"));
    }

    #[test]
    fn store_load_delete_cycle() {
        let (_tmp, store) = temp_store();
        assert!(store.load().is_none());

        store.store("header.payload.sig").unwrap();
        assert_eq!(store.load().as_deref(), Some("header.payload.sig"));
        assert_eq!(
            store.load_with_source().map(|(_, s)| s),
            Some(TokenSource::File)
        );

        store.delete().unwrap();
        assert!(store.load().is_none());
        // Deleting twice is fine.
        store.delete().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, store) = temp_store();
        store.store("tok").unwrap();
        let mode = std::fs::metadata(store.path().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600, "credentials file should be 0600");
    }

    #[test]
    fn whitespace_only_file_is_ignored() {
        let (_tmp, store) = temp_store();
        store.store("   \n  ").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn keys_do_not_collide() {
        let tmp = tempfile::TempDir::new().unwrap();
        let admin = TokenStore::new(tmp.path(), "token").without_env();
        let user = TokenStore::new(tmp.path(), "user_token").without_env();
        admin.store("admin-tok").unwrap();
        assert!(user.load().is_none());
        assert_eq!(admin.load().as_deref(), Some("admin-tok"));
    }

    #[test]
    fn from_config_resolves_dir_and_key() {
        let config = ClientConfig {
            credentials_dir: "/tmp/tcc-test-creds".into(),
            storage_key: "admin_token".into(),
            ..Default::default()
        };
        let store = TokenStore::from_config(&config);
        assert_eq!(
            store.path().unwrap(),
            PathBuf::from("/tmp/tcc-test-creds/admin_token")
        );
    }
}
