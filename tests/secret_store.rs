//! Integration tests for the file-backed secret store.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;

use tempfile::TempDir;
use vkstatus::secret_store::{FileSecretStore, SecretStore, TOKEN_KEY};

fn store_in(temp: &TempDir) -> FileSecretStore {
    FileSecretStore::at(temp.path().join("secrets.json"))
}

#[tokio::test]
async fn get_before_any_set_returns_none() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn set_then_get_roundtrips() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    store.set(TOKEN_KEY, "vk1.a.secret").await.unwrap();

    assert_eq!(
        store.get(TOKEN_KEY).await.unwrap().as_deref(),
        Some("vk1.a.secret")
    );
}

#[tokio::test]
async fn set_replaces_the_previous_value() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    store.set(TOKEN_KEY, "old").await.unwrap();
    store.set(TOKEN_KEY, "new").await.unwrap();

    assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("new"));
}

#[tokio::test]
async fn corrupted_file_reads_as_empty_and_recovers_on_write() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("secrets.json");
    fs::write(&path, "{ not json").unwrap();

    let store = FileSecretStore::at(path);

    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);

    store.set(TOKEN_KEY, "recovered").await.unwrap();
    assert_eq!(
        store.get(TOKEN_KEY).await.unwrap().as_deref(),
        Some("recovered")
    );
}

#[tokio::test]
async fn writes_create_missing_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/config/secrets.json");
    let store = FileSecretStore::at(path.clone());

    store.set(TOKEN_KEY, "tok").await.unwrap();

    assert!(path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn secrets_file_is_owner_readable_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("secrets.json");
    let store = FileSecretStore::at(path.clone());

    store.set(TOKEN_KEY, "tok").await.unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
