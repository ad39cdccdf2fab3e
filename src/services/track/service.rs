use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{info, instrument};

use crate::services::common::Property;

use super::{StatusFetcher, TrackSource, monitoring::TrackMonitoring};

/// Track poller service with reactive property-based state.
///
/// Owns the current-track label and the recurring poll loop. At most one
/// loop task exists at any time; starting a new loop replaces any prior
/// one. Replacing the loop cannot cancel a fetch already in flight - a
/// stale fetch may still win the property write (accepted race).
pub struct TrackPollerService {
    /// Label most recently produced by a poll tick. Writes that don't
    /// change the value are dropped before watchers see them.
    pub current_track: Property<String>,

    source: Arc<dyn TrackSource>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl TrackPollerService {
    /// Create a poller backed by the live VK endpoint.
    pub fn new() -> Self {
        Self::with_source(Arc::new(StatusFetcher::new()))
    }

    /// Create a poller backed by an arbitrary track source.
    pub fn with_source(source: Arc<dyn TrackSource>) -> Self {
        Self {
            current_track: Property::new(String::new()),
            source,
            loop_handle: Mutex::new(None),
        }
    }

    /// Start (or restart) the poll loop with the given token.
    ///
    /// Any previously running loop is aborted first; calling this with no
    /// loop running is fine.
    #[instrument(skip_all)]
    pub async fn start_loop(&self, token: String) {
        let mut guard = self.loop_handle.lock().await;

        if let Some(previous) = guard.take() {
            previous.abort();
            info!("Replaced running poll loop");
        }

        *guard = Some(TrackMonitoring::spawn(
            Arc::clone(&self.source),
            token,
            self.current_track.clone(),
        ));
    }

    /// Stop the poll loop. Idempotent when none is running.
    #[instrument(skip_all)]
    pub async fn stop(&self) {
        if let Some(handle) = self.loop_handle.lock().await.take() {
            handle.abort();
            info!("Poll loop stopped");
        }
    }

    /// Whether a poll loop is currently running.
    pub async fn is_polling(&self) -> bool {
        self.loop_handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for TrackPollerService {
    fn default() -> Self {
        Self::new()
    }
}
