//! Login, registration and the current profile.
//!
//! bcrypt is CPU-bound, so hashing and verification run on the blocking pool.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use tcc_auth::password::{hash_password, verify_password};
use tcc_core::entities::User;
use tcc_core::enums::Role;
use tcc_core::identity::AuthIdentity;
use tcc_core::requests::{LoginRequest, RegisterRequest};
use tcc_core::responses::LoginResponse;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::routes::require_field;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MIN_PASSWORD_LEN: usize = 6;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    require_field(&request.email, "email")?;
    require_field(&request.password, "password")?;

    let Some(credentials) = state.service().find_credentials(&request.email).await? else {
        tracing::info!(email = %request.email, "login for unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let password = request.password;
    let hash = credentials.password_hash;
    let matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
    if !matches {
        tracing::info!(user = %credentials.user.id, "login with wrong password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.keys().issue(&credentials.user)?;
    state.service().record_login(&credentials.user).await?;
    Ok(Json(LoginResponse {
        token,
        user: credentials.user,
    }))
}

/// Self-service sign-up. Always creates a `user`-role account.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let user = create_account(
        &state,
        &request.name,
        &request.email,
        request.password,
        Role::User,
        None,
    )
    .await?;
    let token = state.keys().issue(&user)?;
    Ok((StatusCode::CREATED, Json(LoginResponse { token, user })))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<User>, ApiError> {
    let user = state.service().get_user(&identity.user_id).await?;
    Ok(Json(user))
}

/// Validate, hash and insert a new account.
pub(crate) async fn create_account(
    state: &AppState,
    name: &str,
    email: &str,
    password: String,
    role: Role,
    actor: Option<&str>,
) -> Result<User, ApiError> {
    require_field(name, "name")?;
    require_field(email, "email")?;
    if !email.contains('@') {
        return Err(ApiError::bad_request("email is not a valid address"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let cost = state.config().auth.bcrypt_cost;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;
    let user = state
        .service()
        .create_user(name, email, &hash, role, actor)
        .await?;
    tracing::info!(user = %user.id, role = %user.role, "account created");
    Ok(user)
}
