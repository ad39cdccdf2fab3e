//! Widget lifecycle.
//!
//! Ties credential acquisition to the poll loop: on activation the stored
//! token starts the loop directly, otherwise the user is prompted once.
//! The prompt-and-store flow is also reachable on demand, mirroring the
//! widget's "set credential" command.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    Result,
    prompt::TokenPrompt,
    secret_store::{SecretStore, TOKEN_KEY},
    services::track::TrackPollerService,
};

/// Notice printed when the user cancels token entry.
pub const CANCELLED_NOTICE: &str = "Token entry cancelled; run `vkstatus set-token` to set one.";

/// The status widget: poller service plus its collaborators.
pub struct TrackWidget {
    service: Arc<TrackPollerService>,
    store: Arc<dyn SecretStore>,
    prompt: Arc<dyn TokenPrompt>,
}

impl TrackWidget {
    /// Assemble a widget from its collaborators.
    pub fn new(store: Arc<dyn SecretStore>, prompt: Arc<dyn TokenPrompt>) -> Self {
        Self {
            service: Arc::new(TrackPollerService::new()),
            store,
            prompt,
        }
    }

    /// The poller service, for subscribing to track updates.
    pub fn service(&self) -> &Arc<TrackPollerService> {
        &self.service
    }

    /// Startup: use the stored token if there is one, otherwise prompt.
    ///
    /// Returns whether polling was started.
    ///
    /// # Errors
    /// Returns error if secret storage or the prompt fails.
    #[instrument(skip_all)]
    pub async fn activate(&self) -> Result<bool> {
        match self.store.get(TOKEN_KEY).await? {
            Some(token) => {
                info!("Using stored token");
                self.service.start_loop(token).await;
                Ok(true)
            }
            None => self.prompt_and_store().await,
        }
    }

    /// Prompt for a token; on submission start the loop and persist it.
    ///
    /// Cancellation performs no persistence write and starts no loop, it
    /// only prints a one-time notice.
    ///
    /// # Errors
    /// Returns error if the prompt or the persistence write fails.
    #[instrument(skip_all)]
    pub async fn prompt_and_store(&self) -> Result<bool> {
        match self.prompt.read_token().await? {
            Some(token) => {
                self.service.start_loop(token.clone()).await;
                self.store.set(TOKEN_KEY, &token).await?;
                Ok(true)
            }
            None => {
                info!("Token entry cancelled");
                println!("{CANCELLED_NOTICE}");
                Ok(false)
            }
        }
    }

    /// Shutdown: stop the loop. Idempotent when none is running.
    pub async fn deactivate(&self) {
        self.service.stop().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::{
        collections::HashMap,
        io::Error,
        result::Result,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::secret_store::SecretStoreError;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        secrets: Mutex<HashMap<String, String>>,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl SecretStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, SecretStoreError> {
            Ok(self.secrets.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), SecretStoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.secrets
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct ScriptedPrompt(Option<String>);

    #[async_trait]
    impl TokenPrompt for ScriptedPrompt {
        async fn read_token(&self) -> Result<Option<String>, Error> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn stored_token_starts_polling_without_prompting() {
        let store = Arc::new(MemoryStore::default());
        store.set(TOKEN_KEY, "stored-tok").await.unwrap();
        store.writes.store(0, Ordering::SeqCst);

        let widget = TrackWidget::new(store.clone(), Arc::new(ScriptedPrompt(None)));

        assert!(widget.activate().await.unwrap());
        assert!(widget.service().is_polling().await);
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submission_persists_once_and_starts_polling() {
        let store = Arc::new(MemoryStore::default());
        let prompt = Arc::new(ScriptedPrompt(Some("fresh-tok".to_string())));
        let widget = TrackWidget::new(store.clone(), prompt);

        assert!(widget.activate().await.unwrap());
        assert!(widget.service().is_polling().await);
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.get(TOKEN_KEY).await.unwrap().as_deref(),
            Some("fresh-tok")
        );
    }

    #[tokio::test]
    async fn cancellation_writes_nothing_and_starts_nothing() {
        let store = Arc::new(MemoryStore::default());
        let widget = TrackWidget::new(store.clone(), Arc::new(ScriptedPrompt(None)));

        assert!(!widget.activate().await.unwrap());
        assert!(!widget.service().is_polling().await);
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deactivate_stops_the_loop() {
        let store = Arc::new(MemoryStore::default());
        store.set(TOKEN_KEY, "tok").await.unwrap();

        let widget = TrackWidget::new(store, Arc::new(ScriptedPrompt(None)));
        widget.activate().await.unwrap();
        widget.deactivate().await;
        widget.deactivate().await;

        assert!(!widget.service().is_polling().await);
    }
}
