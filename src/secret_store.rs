//! Persistent secret storage for the widget.
//!
//! The widget stores exactly one secret, the VK access token, keyed by a
//! fixed string. The store is a small JSON file in the config directory;
//! the trait seam exists so tests can substitute an in-memory store.

use std::{collections::HashMap, fs, path::PathBuf, time::SystemTime};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::ConfigPaths;

/// Key under which the VK access token is stored.
pub const TOKEN_KEY: &str = "token";

/// Errors that can occur while reading or writing secret storage.
#[derive(Error, Debug)]
pub enum SecretStoreError {
    /// The secrets file or its directory could not be accessed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A secret value could not be serialized for storage.
    #[error("Failed to encode secrets: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key/value secret storage used by the widget.
///
/// Only two operations are needed: asynchronous get-by-key and
/// asynchronous set-by-key.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up a stored secret.
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, SecretStoreError>;

    /// Persist a secret, replacing any previous value for the key.
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), SecretStoreError>;
}

/// On-disk layout of the secrets file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SecretFile {
    secrets: HashMap<String, String>,
    last_updated: SystemTime,
}

impl Default for SecretFile {
    fn default() -> Self {
        Self {
            secrets: HashMap::new(),
            last_updated: SystemTime::now(),
        }
    }
}

/// File-backed secret store at `$XDG_CONFIG_HOME/vkstatus/secrets.json`.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Create a store rooted at the default config directory.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined.
    pub fn new() -> Result<Self, SecretStoreError> {
        Ok(Self {
            path: ConfigPaths::secrets_file()?,
        })
    }

    /// Create a store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the secrets file, or return defaults if it doesn't exist.
    ///
    /// A corrupted file is treated as empty rather than fatal; the user can
    /// re-enter the token.
    fn load(&self) -> Result<SecretFile, SecretStoreError> {
        if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            let file: SecretFile = serde_json::from_str(&content).unwrap_or_else(|_| {
                warn!("Invalid secrets file, starting empty");
                SecretFile::default()
            });
            Ok(file)
        } else {
            Ok(SecretFile::default())
        }
    }

    fn save(&self, file: &SecretFile) -> Result<(), SecretStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, content)?;

        // Token material: keep the file owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, SecretStoreError> {
        let file = self.load()?;
        Ok(file.secrets.get(key).cloned())
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<(), SecretStoreError> {
        let mut file = self.load()?;
        file.secrets.insert(key.to_string(), value.to_string());
        file.last_updated = SystemTime::now();
        self.save(&file)?;
        info!("Secret updated: {key}");

        Ok(())
    }
}
