use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tcc_core::enums::Role;
use tcc_core::identity::AuthIdentity;

/// Claims carried by every TCC access token.
///
/// Produced by [`crate::jwt::TokenKeys::issue`], read back either with full
/// signature verification (server) or with [`crate::decode::decode_unverified`]
/// (client).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TccClaims {
    /// User id (`usr-…`).
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    pub iss: String,
}

impl TccClaims {
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.sub.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Expired unless `exp * 1000 > now_ms`.
    #[must_use]
    pub const fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp.saturating_mul(1000) <= now_ms
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_claims(exp: i64) -> TccClaims {
        TccClaims {
            sub: "usr-0a1b2c3d".into(),
            email: "ops@tcc.local".into(),
            name: "Ops".into(),
            role: Role::Admin,
            iat: exp - 3600,
            exp,
            iss: "tcc".into(),
        }
    }

    #[test]
    fn to_identity_maps_fields() {
        let identity = make_claims(Utc::now().timestamp() + 60).to_identity();
        assert_eq!(identity.user_id, "usr-0a1b2c3d");
        assert_eq!(identity.email, "ops@tcc.local");
        assert!(identity.is_admin());
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let claims = make_claims(1_700_000_000);
        assert!(!claims.is_expired_at(1_699_999_999_999));
        assert!(claims.is_expired_at(1_700_000_000_000));
        assert!(claims.is_expired_at(1_700_000_000_001));
    }

    #[test]
    fn past_expiry_is_expired() {
        assert!(make_claims(Utc::now().timestamp() - 10).is_expired());
        assert!(!make_claims(Utc::now().timestamp() + 3600).is_expired());
    }

    #[test]
    fn expires_at_converts_seconds() {
        let claims = make_claims(1_700_000_000);
        assert_eq!(claims.expires_at().map(|t| t.timestamp()), Some(1_700_000_000));
    }
}
