use anyhow::Context;
use tcc_auth::Session;
use tcc_client::ApiClient;
use tcc_config::TccConfig;

/// Everything a command handler needs: the API client and the stored session.
pub struct AppContext {
    pub config: TccConfig,
    pub client: ApiClient,
    pub session: Session,
}

impl AppContext {
    pub fn init(config: TccConfig) -> anyhow::Result<Self> {
        let client = ApiClient::from_config(&config.client)
            .context("failed to initialize API client")?;
        let session = tcc_auth::restore_session(&config.client);
        Ok(Self {
            config,
            client,
            session,
        })
    }

    /// The bearer token for protected calls.
    pub fn token(&self) -> anyhow::Result<&str> {
        self.session
            .require_token()
            .context("not logged in. Run 'tcc auth login' first.")
    }
}
