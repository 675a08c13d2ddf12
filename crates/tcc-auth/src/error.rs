use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `tcc auth login`")]
    NotAuthenticated,

    #[error("token expired; run `tcc auth login` again")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token decode failed: {0}")]
    Decode(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}
