use thiserror::Error;

use crate::{secret_store::SecretStoreError, services::track::TrackError};

/// Top-level widget error.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// IO failure while touching config or state files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Secret storage could not be read or written.
    #[error("Secret storage error: {0}")]
    SecretStore(#[from] SecretStoreError),

    /// Status fetch failed at the transport or decode layer.
    #[error("Track poll error: {0}")]
    Track(#[from] TrackError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, WidgetError>;
