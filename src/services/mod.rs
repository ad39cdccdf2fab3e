/// Common utilities and abstractions for services
pub mod common;
/// VK track polling service
pub mod track;

pub use track::{TrackError, TrackPollerService};
