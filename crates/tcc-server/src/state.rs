use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tcc_auth::TokenKeys;
use tcc_config::TccConfig;
use tcc_db::service::TccService;

/// Shared, immutable handler state. Cloning is a handful of `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    service: Arc<TccService>,
    keys: Arc<TokenKeys>,
    config: Arc<TccConfig>,
    request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(service: TccService, keys: TokenKeys, config: TccConfig) -> Self {
        Self {
            service: Arc::new(service),
            keys: Arc::new(keys),
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    #[must_use]
    pub fn service(&self) -> &TccService {
        &self.service
    }

    #[must_use]
    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }

    #[must_use]
    pub fn config(&self) -> &TccConfig {
        &self.config
    }

    pub(crate) fn next_request_id(&self) -> String {
        let id = self.request_id_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    }
}
