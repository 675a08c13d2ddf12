//! Route table. Everything except health, login and register sits behind
//! [`require_auth`]; `/users` additionally behind [`require_admin`].

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};

use crate::error::ApiError;
use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;

pub mod activity;
pub mod auth;
pub mod branches;
pub mod consignments;
pub mod dashboard;
pub mod dispatch;
pub mod health;
pub mod reports;
pub mod trucks;
pub mod users;

/// Routes mounted under `/api`.
pub fn api_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register));

    let admin = Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", delete(users::remove))
        .route_layer(from_fn(require_admin));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/activity", get(activity::list))
        .route("/branches", get(branches::list).post(branches::create))
        .route(
            "/branches/{id}",
            get(branches::get_one)
                .put(branches::update)
                .delete(branches::remove),
        )
        .route("/trucks", get(trucks::list).post(trucks::create))
        .route(
            "/trucks/{id}",
            get(trucks::get_one).put(trucks::update).delete(trucks::remove),
        )
        .route(
            "/consignments",
            get(consignments::list).post(consignments::create),
        )
        .route(
            "/consignments/track/{tracking_number}",
            get(consignments::track),
        )
        .route(
            "/consignments/{id}",
            get(consignments::get_one)
                .put(consignments::update)
                .delete(consignments::remove),
        )
        .route("/dispatch", get(dispatch::list).post(dispatch::assign))
        .route(
            "/dispatch/{consignment_id}",
            put(dispatch::deliver).delete(dispatch::cancel),
        )
        .route("/reports/consignments", get(reports::consignments))
        .route("/reports/trucks", get(reports::trucks))
        .merge(admin)
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    public.merge(protected)
}

/// Reject blank required text fields with a 400.
pub(crate) fn require_field(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::bad_request(format!("{field} is required")))
    } else {
        Ok(())
    }
}
