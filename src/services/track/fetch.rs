use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use super::{
    TrackError,
    types::{
        API_VERSION, NETWORK_ERROR_LABEL, STATUS_ENDPOINT, StatusGetResponse, TOKEN_ERROR_LABEL,
        TRACK_PREFIX,
    },
};

/// Produces the status-bar label for a given token.
///
/// The seam exists so the poll loop can be driven by a scripted source in
/// tests.
#[async_trait]
pub trait TrackSource: Send + Sync + 'static {
    /// Fetch the label for one tick.
    ///
    /// # Errors
    /// Returns error when the fetch fails before a label can be derived;
    /// the loop renders [`super::REQUEST_ERROR_LABEL`] in that case.
    async fn fetch_label(&self, token: &str) -> Result<String, TrackError>;
}

/// Fetches the current VK status over HTTP.
///
/// Owns a pooled [`Client`]; one GET per tick, no retries. Failure
/// translation for well-formed-but-unsuccessful replies happens here, in
/// [`interpret`]; transport errors propagate to the caller.
#[derive(Debug, Clone, Default)]
pub struct StatusFetcher {
    client: Client,
}

impl StatusFetcher {
    /// Create a fetcher with a fresh connection pool.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl TrackSource for StatusFetcher {
    #[instrument(skip_all)]
    async fn fetch_label(&self, token: &str) -> Result<String, TrackError> {
        let response = self
            .client
            .get(STATUS_ENDPOINT)
            .query(&[("access_token", token), ("v", API_VERSION)])
            .send()
            .await?;

        let status = response.status();
        debug!("status.get answered {status}");

        if !status.is_success() {
            return Ok(NETWORK_ERROR_LABEL.to_string());
        }

        let body = response.text().await?;
        interpret(status, &body)
    }
}

/// Map a raw `(status, body)` pair onto the label shown in the status bar.
///
/// - non-2xx: [`NETWORK_ERROR_LABEL`], body ignored
/// - 2xx with `response.text`: `"♫ "` + text
/// - 2xx without a `response` field: [`TOKEN_ERROR_LABEL`]
/// - unparseable body: decode error, rendered by the loop as
///   [`super::REQUEST_ERROR_LABEL`]
///
/// # Errors
/// Returns error if a 2xx body is not valid JSON.
pub fn interpret(status: StatusCode, body: &str) -> Result<String, TrackError> {
    if !status.is_success() {
        return Ok(NETWORK_ERROR_LABEL.to_string());
    }

    let decoded: StatusGetResponse = serde_json::from_str(body)?;

    match decoded.response {
        Some(inner) => Ok(format!("{TRACK_PREFIX}{}", inner.text)),
        None => Ok(TOKEN_ERROR_LABEL.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_a_network_error() {
        let label = interpret(StatusCode::INTERNAL_SERVER_ERROR, "").unwrap();
        assert_eq!(label, "Network Error");
    }

    #[test]
    fn unauthorized_status_is_a_network_error_too() {
        let label = interpret(StatusCode::UNAUTHORIZED, "{}").unwrap();
        assert_eq!(label, "Network Error");
    }

    #[test]
    fn success_with_text_renders_the_track() {
        let body = r#"{"response":{"text":"Song A"}}"#;
        let label = interpret(StatusCode::OK, body).unwrap();
        assert_eq!(label, "♫ Song A");
    }

    #[test]
    fn missing_response_field_means_bad_token() {
        let label = interpret(StatusCode::OK, "{}").unwrap();
        assert_eq!(label, "Token Error");
    }

    #[test]
    fn error_shaped_reply_means_bad_token() {
        let body = r#"{"error":{"error_code":5,"error_msg":"User authorization failed"}}"#;
        let label = interpret(StatusCode::OK, body).unwrap();
        assert_eq!(label, "Token Error");
    }

    #[test]
    fn response_without_text_renders_an_empty_track() {
        let body = r#"{"response":{}}"#;
        let label = interpret(StatusCode::OK, body).unwrap();
        assert_eq!(label, "♫ ");
    }

    #[test]
    fn unparseable_body_is_a_decode_error() {
        let result = interpret(StatusCode::OK, "<html>gateway</html>");
        assert!(matches!(result, Err(TrackError::Decode(_))));
    }
}
