/// Errors that can occur while polling the status endpoint
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    /// Transport-level failure: connection refused, timeout, TLS, etc.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Failed to decode status response: {0}")]
    Decode(#[from] serde_json::Error),
}
