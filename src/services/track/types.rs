use std::time::Duration;

use serde::Deserialize;

/// Interval between poll ticks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// VK API version sent with every request.
pub const API_VERSION: &str = "5.199";

/// Endpoint queried on every tick.
pub const STATUS_ENDPOINT: &str = "https://api.vk.ru/method/status.get";

/// Label shown when the endpoint answers with a non-success status.
pub const NETWORK_ERROR_LABEL: &str = "Network Error";

/// Label shown when the response lacks the `response` field, which the API
/// produces for invalid or expired tokens.
pub const TOKEN_ERROR_LABEL: &str = "Token Error";

/// Label shown when the fetch itself fails (transport or decode error).
pub const REQUEST_ERROR_LABEL: &str = "Request Error";

/// Prefix rendered before the track text.
pub const TRACK_PREFIX: &str = "♫ ";

/// Body of a `status.get` reply.
///
/// A well-formed success carries `response.text`; error replies omit the
/// `response` field entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusGetResponse {
    /// Present on success, absent when the token is rejected.
    pub response: Option<StatusBody>,
}

/// Inner payload of a successful `status.get` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusBody {
    /// The user's status text, i.e. the currently playing track.
    #[serde(default)]
    pub text: String,
}
