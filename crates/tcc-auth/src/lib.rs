//! # tcc-auth
//!
//! Authentication for TCC.
//!
//! Server side: bcrypt password hashing ([`password`]) and HS256 token
//! issuance/verification ([`jwt`]). Client side: unverified claim decoding
//! ([`decode`]), token persistence ([`token_store`]) and the session
//! lifecycle ([`session`]).

pub mod claims;
pub mod decode;
pub mod error;
pub mod jwt;
pub mod password;
pub mod session;
pub mod token_store;

pub use claims::TccClaims;
pub use error::AuthError;
pub use jwt::TokenKeys;
pub use session::Session;
pub use token_store::TokenStore;

use tcc_config::ClientConfig;

/// Restore the client session described by `[client]` config.
#[must_use]
pub fn restore_session(config: &ClientConfig) -> Session {
    Session::restore(TokenStore::from_config(config))
}
