//! # tcc-server
//!
//! axum HTTP API for TCC. [`build_router`] assembles the route table over an
//! [`AppState`]; [`serve`] opens the database, seeds the bootstrap admin and
//! runs until SIGINT/SIGTERM.
//!
//! Request flow: CORS → `http.request` span with `x-request-id` →
//! (protected routes) bearer-token guard → handler → [`ApiError`] mapping.

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tcc_auth::TokenKeys;
use tcc_config::{ServerConfig, TccConfig};
use tcc_db::service::TccService;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

pub mod bootstrap;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Full application router: health at `/`, everything else under `/api`.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server);
    Router::new()
        .route("/", get(routes::health::health))
        .nest("/api", routes::api_router(&state))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing,
        ))
        .layer(cors)
        .with_state(state)
}

/// Any origin unless `server.cors_origins` lists specific ones.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(middleware::REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Open the store, build state and serve until shutdown.
///
/// # Errors
///
/// Fails if the database cannot be opened, the bootstrap admin cannot be
/// seeded, or the listener cannot bind.
pub async fn serve(config: TccConfig) -> anyhow::Result<()> {
    let service = TccService::open(&config.database)
        .await
        .context("failed to open database")?;
    bootstrap::ensure_bootstrap_admin(&service, &config.auth)
        .await
        .context("failed to seed bootstrap admin")?;
    let keys = TokenKeys::from_config(&config.auth).context("failed to load token keys")?;

    let address = config.server.bind_addr();
    let state = AppState::new(service, keys, config);
    let app = build_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "TCC server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
