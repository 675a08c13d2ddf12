//! Request tracing and the auth/role guards.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tcc_core::identity::AuthIdentity;
use tracing::Instrument;

use crate::error::ApiError;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wrap the request in an `http.request` span and echo `x-request-id`,
/// generating one when the caller sent none.
pub async fn request_tracing(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| state.next_request_id(), ToString::to_string);

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %request.method(),
        route = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| tracing::debug!(status = response.status().as_u16(), "request completed"));
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// `Bearer <token>` from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Not authorized, malformed header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Not authorized, expected a bearer token"))
}

/// Verify the bearer token and attach the caller's [`AuthIdentity`] to the
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let identity = match bearer_token(request.headers())
        .and_then(|token| state.keys().verify(token).map_err(ApiError::from))
    {
        Ok(claims) => claims.to_identity(),
        Err(error) => {
            tracing::debug!(%error, "rejected unauthenticated request");
            return error.into_response();
        }
    };
    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Must be layered inside [`require_auth`].
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthIdentity>() {
        Some(identity) if identity.is_admin() => next.run(request).await,
        Some(identity) => {
            tracing::warn!(user = %identity.email, "non-admin attempted user management");
            ApiError::Forbidden("Admin access required".into()).into_response()
        }
        None => ApiError::unauthorized("Not authorized, no token").into_response(),
    }
}
