//! Response status handling shared by every endpoint.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Pass success responses through; turn anything else into a
/// [`ClientError`] carrying the server's `message` when the body has one.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body);
    tracing::debug!(status = status.as_u16(), %message, "API request rejected");
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized(message));
    }
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Decode a checked response body.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let bytes = check_response(resp).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
}

/// `message` (plus `error` for 500s) from a JSON error body, else the raw text.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    match (
        value.get("message").and_then(|m| m.as_str()),
        value.get("error").and_then(|e| e.as_str()),
    ) {
        (Some(message), Some(error)) => format!("{message} ({error})"),
        (Some(message), None) => message.to_string(),
        _ => body.trim().to_string(),
    }
}
