use std::path::Path;

use anyhow::Context;
use tcc_config::TccConfig;

use crate::cli::GlobalFlags;

/// Read `.env`, load config (with `--config` layered in), then apply `--base-url`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TccConfig> {
    load_dotenv()?;

    let mut config = match &flags.config {
        Some(path) => TccConfig::load_from_file(Path::new(path))
            .with_context(|| format!("failed to load config file {path}"))?,
        None => TccConfig::load().context("failed to load configuration")?,
    };

    if let Some(base_url) = &flags.base_url {
        config.client.base_url.clone_from(base_url);
    }
    tracing::debug!(base_url = %config.client.base_url, "client configured");
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error).context("failed to load .env"),
    }
}
