//! HS256 token issuance and verification for the server.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tcc_config::AuthConfig;
use tcc_core::entities::User;

use crate::claims::TccClaims;
use crate::error::AuthError;

const EPHEMERAL_SECRET_BYTES: usize = 32;

/// Signing and verification keys plus the issuance policy.
///
/// Built once at start-up and shared read-only between handlers.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: TimeDelta,
    ephemeral: bool,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .field("ephemeral", &self.ephemeral)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: TimeDelta) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
            ephemeral: false,
        }
    }

    /// Build keys from `[auth]` config. An empty `jwt_secret` yields a random
    /// per-process secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Other`] if the OS random source fails or the TTL
    /// does not fit a [`TimeDelta`].
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let ttl_secs = i64::try_from(config.token_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                AuthError::Other(format!(
                    "auth.token_ttl_secs out of range: {}",
                    config.token_ttl_secs
                ))
            })?;

        if config.has_secret() {
            return Ok(Self::new(
                config.jwt_secret.as_bytes(),
                &config.issuer,
                ttl_secs,
            ));
        }

        let mut secret = [0u8; EPHEMERAL_SECRET_BYTES];
        getrandom::fill(&mut secret)
            .map_err(|e| AuthError::Other(format!("failed to generate JWT secret: {e}")))?;
        tracing::warn!(
            "auth.jwt_secret is not set; using an ephemeral secret, tokens will not survive a restart"
        );
        let mut keys = Self::new(&secret, &config.issuer, ttl_secs);
        keys.ephemeral = true;
        Ok(keys)
    }

    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign a token for `user`, valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    /// Sign a token as if issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = TccClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature, issuer and expiry (no leeway).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExpired`] for an expired token and
    /// [`AuthError::InvalidToken`] for anything else that fails validation.
    pub fn verify(&self, token: &str) -> Result<TccClaims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify as of `now`. A token stops being valid at the `exp` second
    /// itself, the same rule [`TccClaims::is_expired_at`] applies client-side.
    ///
    /// # Errors
    ///
    /// Same as [`TokenKeys::verify`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TccClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        let claims = jsonwebtoken::decode::<TccClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;
        if claims.is_expired_at(now.timestamp_millis()) {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }
}
