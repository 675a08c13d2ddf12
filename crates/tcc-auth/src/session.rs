//! Client session lifecycle: restore a stored token, log in, log out.
//!
//! A stored token counts only while `exp * 1000 > now_ms`. Expired and
//! undecodable tokens are removed from storage on restore, leaving the
//! session logged out.

use chrono::Utc;
use tcc_core::identity::AuthIdentity;

use crate::claims::TccClaims;
use crate::decode::decode_unverified;
use crate::error::AuthError;
use crate::token_store::{TokenSource, TokenStore};

#[derive(Debug)]
pub struct Session {
    store: TokenStore,
    current: Option<Current>,
}

#[derive(Debug, Clone)]
struct Current {
    token: String,
    claims: TccClaims,
    source: TokenSource,
}

impl Session {
    /// Restore from storage using the current clock.
    #[must_use]
    pub fn restore(store: TokenStore) -> Self {
        Self::restore_at(store, Utc::now().timestamp_millis())
    }

    /// Restore from storage as of `now_ms` (milliseconds since the epoch).
    #[must_use]
    pub fn restore_at(store: TokenStore, now_ms: i64) -> Self {
        let Some((token, source)) = store.load_with_source() else {
            return Self {
                store,
                current: None,
            };
        };

        let current = match decode_unverified(&token) {
            Ok(claims) if !claims.is_expired_at(now_ms) => Some(Current {
                token,
                claims,
                source,
            }),
            Ok(claims) => {
                tracing::info!(exp = claims.exp, "stored token expired; clearing");
                discard(&store, source);
                None
            }
            Err(error) => {
                tracing::error!(%error, "invalid stored token; clearing");
                discard(&store, source);
                None
            }
        };

        Self { store, current }
    }

    /// Persist `token`, then decode it and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] if persisting fails and
    /// [`AuthError::Decode`] if the token cannot be decoded; in the latter
    /// case the just-written token is removed again.
    pub fn login(&mut self, token: &str) -> Result<&TccClaims, AuthError> {
        self.store.store(token)?;
        let claims = match decode_unverified(token) {
            Ok(claims) => claims,
            Err(error) => {
                discard(&self.store, TokenSource::File);
                self.current = None;
                return Err(error);
            }
        };
        let current = self.current.insert(Current {
            token: token.to_string(),
            claims,
            source: TokenSource::File,
        });
        Ok(&current.claims)
    }

    /// Clear storage and forget the current token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] if the credentials file cannot be removed.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if self.source() == Some(TokenSource::Env) {
            tracing::warn!("logged out, but the token in the environment will be used again next time");
        }
        self.current = None;
        self.store.delete()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Bearer token to attach to requests, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.token.as_str())
    }

    /// Like [`token`](Self::token) but an error when logged out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when there is no current token.
    pub fn require_token(&self) -> Result<&str, AuthError> {
        self.token().ok_or(AuthError::NotAuthenticated)
    }

    #[must_use]
    pub fn claims(&self) -> Option<&TccClaims> {
        self.current.as_ref().map(|c| &c.claims)
    }

    #[must_use]
    pub fn identity(&self) -> Option<AuthIdentity> {
        self.claims().map(TccClaims::to_identity)
    }

    #[must_use]
    pub fn source(&self) -> Option<TokenSource> {
        self.current.as_ref().map(|c| c.source)
    }

    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        &self.store
    }
}

fn discard(store: &TokenStore, source: TokenSource) {
    if source == TokenSource::Env {
        tracing::warn!(
            "token from environment is unusable; unset it to stop this warning"
        );
        return;
    }
    if let Err(error) = store.delete() {
        tracing::warn!(%error, "failed to remove stored token");
    }
}
