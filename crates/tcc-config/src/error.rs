use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Provider merge or extraction failed (bad TOML, wrong type in an env var, ...).
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A section lacks the fields an operation needs, e.g. `database.url` for a remote open.
    #[error("Section '{section}' is not configured: {missing}")]
    NotConfigured { section: String, missing: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
