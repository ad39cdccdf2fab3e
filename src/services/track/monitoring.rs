use std::sync::Arc;

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::debug;

use crate::services::common::Property;

use super::{
    TrackSource,
    types::{POLL_INTERVAL, REQUEST_ERROR_LABEL},
};

/// The recurring poll loop.
///
/// Each tick spawns an independent fetch task; ticks are deliberately not
/// serialized. A slow fetch from tick N may finish after tick N+1 has
/// already started its own, and whichever finishes last wins the property
/// write. Serializing them would change the widget's observable timing, so
/// the race stays.
pub(super) struct TrackMonitoring;

impl TrackMonitoring {
    /// Spawn the loop task. The first tick fires one interval after start.
    pub(super) fn spawn(
        source: Arc<dyn TrackSource>,
        token: String,
        current_track: Property<String>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let source = Arc::clone(&source);
                let token = token.clone();
                let current_track = current_track.clone();

                tokio::spawn(async move {
                    match source.fetch_label(&token).await {
                        Ok(label) => current_track.set(label),
                        Err(e) => {
                            debug!("Poll tick failed: {e}");
                            current_track.set(REQUEST_ERROR_LABEL.to_string());
                        }
                    }
                });
            }
        })
    }
}
