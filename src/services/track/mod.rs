//! VK track polling service.
//!
//! Polls the VK `status.get` endpoint every [`types::POLL_INTERVAL`] and
//! publishes the resulting label through a reactive property. All poll
//! failures are translated into fixed labels; nothing here is ever fatal
//! to the loop.

/// Track polling error types
pub mod error;
/// Status fetch against the VK API
pub mod fetch;
/// The recurring poll loop
mod monitoring;
/// The poller service itself
mod service;
/// Wire types and fixed labels
pub mod types;

pub use error::TrackError;
pub use fetch::{StatusFetcher, TrackSource};
pub use service::TrackPollerService;
pub use types::{
    NETWORK_ERROR_LABEL, POLL_INTERVAL, REQUEST_ERROR_LABEL, TOKEN_ERROR_LABEL, TRACK_PREFIX,
};
