//! # tcc-client
//!
//! Typed HTTP client for the TCC REST API.
//!
//! The client holds no credentials. Every protected call takes the bearer
//! token as an argument and attaches it to that request only, so one
//! [`ApiClient`] can serve several sessions and nothing leaks between them.
//! The base URL (`client.base_url`) includes the `/api` segment.

pub mod auth;
pub mod branches;
pub mod consignments;
pub mod error;
mod http;
pub mod reports;
pub mod trucks;
pub mod users;

pub use error::ClientError;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tcc_config::ClientConfig;
use tcc_core::responses::MessageResponse;

use crate::http::read_json;

const USER_AGENT: &str = concat!("tcc-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for one TCC API root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] unless the URL is `http(s)://`,
    /// and [`ClientError::Http`] if the underlying client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url,
                reason: "expected an http:// or https:// URL".into(),
            });
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// As [`ApiClient::new`] for `config.base_url`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        tracing::debug!(%method, path, authenticated = token.is_some(), "API request");
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        let resp = self
            .request(reqwest::Method::GET, path, Some(token))
            .send()
            .await?;
        read_json(resp).await
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.request(method, path, token).json(body).send().await?;
        read_json(resp).await
    }

    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        let resp = self.request(method, path, Some(token)).send().await?;
        read_json(resp).await
    }

    /// `GET /` on the server root (the base URL minus `/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the server is unreachable or unhealthy.
    pub async fn health(&self) -> Result<MessageResponse, ClientError> {
        let root = self.base_url.strip_suffix("/api").unwrap_or(&self.base_url);
        let resp = self.http.get(format!("{root}/")).send().await?;
        read_json(resp).await
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `?k=v&...` from the pairs that have a value, or an empty string.
pub(crate) fn query_string(pairs: &[(&str, Option<String>)]) -> String {
    let parts: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| format!("{key}={}", urlencoding::encode(v)))
        })
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}
