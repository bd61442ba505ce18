//! Local filesystem avatar storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use contacts_core::config::StorageConfig;
use contacts_core::error::{AppError, ErrorKind};
use contacts_core::result::AppResult;
use contacts_core::traits::AvatarStorage;

/// Sub-directory of the storage root holding avatars. Also the URL segment.
pub const AVATAR_DIR: &str = "avatars";

/// Writes avatars to `{root}/avatars/{key}.png`.
#[derive(Debug, Clone)]
pub struct LocalAvatarStorage {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalAvatarStorage {
    /// Create the avatar directory if needed.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let dir = PathBuf::from(&config.root).join(AVATAR_DIR);
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create avatar directory: {}", dir.display()),
                e,
            )
        })?;
        Ok(Self {
            dir,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Directory served under `/avatars`.
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::bad_request(format!("Invalid avatar key: {key}")));
        }
        Ok(self.dir.join(format!("{key}.png")))
    }
}

#[async_trait]
impl AvatarStorage for LocalAvatarStorage {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn store(&self, key: &str, png: Bytes) -> AppResult<String> {
        let path = self.resolve(key)?;
        let tmp = path.with_extension("png.tmp");

        fs::write(&tmp, &png).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write avatar: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move avatar into place: {}", path.display()),
                e,
            )
        })?;

        debug!(key, bytes = png.len(), "Stored avatar");
        // version query busts browser caches after a re-upload
        Ok(format!(
            "{}/{AVATAR_DIR}/{key}.png?v={}",
            self.public_base_url,
            Utc::now().timestamp_millis()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage(root: &Path) -> LocalAvatarStorage {
        LocalAvatarStorage::new(&StorageConfig {
            root: root.to_string_lossy().into_owned(),
            public_base_url: "http://localhost:8000/".into(),
            ..StorageConfig::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_url() {
        let tmp = tempfile::tempdir().unwrap();
        let store = storage(tmp.path()).await;

        let url = store.store("user-1", Bytes::from_static(b"png")).await.unwrap();
        assert!(url.starts_with("http://localhost:8000/avatars/user-1.png?v="));
        let written = fs::read(tmp.path().join("avatars/user-1.png")).await.unwrap();
        assert_eq!(written, b"png");
    }

    #[tokio::test]
    async fn test_store_replaces_previous() {
        let tmp = tempfile::tempdir().unwrap();
        let store = storage(tmp.path()).await;
        store.store("u", Bytes::from_static(b"one")).await.unwrap();
        store.store("u", Bytes::from_static(b"two")).await.unwrap();
        let written = fs::read(tmp.path().join("avatars/u.png")).await.unwrap();
        assert_eq!(written, b"two");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let store = storage(tmp.path()).await;
        let err = store
            .store("../escape", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
    }
}
