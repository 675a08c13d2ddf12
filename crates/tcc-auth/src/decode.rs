//! Client-side token decoding.
//!
//! Reads the claims segment of a JWT without checking its signature. The
//! client only needs the identity and `exp` to decide whether a stored token
//! is still worth sending; the server verifies every request anyway.

use base64::Engine as _;

use crate::claims::TccClaims;
use crate::error::AuthError;

/// Decode the payload of `token` into [`TccClaims`] without verification.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] if the token does not have three segments,
/// the payload is not base64url, or the JSON does not match [`TccClaims`].
pub fn decode_unverified(token: &str) -> Result<TccClaims, AuthError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::Decode("invalid JWT format".into()));
    };

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::Decode(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::Decode(format!("claims parse failed: {e}")))
}
