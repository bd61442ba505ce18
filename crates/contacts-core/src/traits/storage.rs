//! Avatar storage trait for pluggable image backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Backend that persists processed avatar images and hands back a public URL.
///
/// The trait is defined here in `contacts-core` and implemented in
/// `contacts-storage`.
#[async_trait]
pub trait AvatarStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. "local").
    fn provider_type(&self) -> &str;

    /// Store an already normalized PNG for `key` and return its public URL.
    ///
    /// Storing again for the same key replaces the previous image.
    async fn store(&self, key: &str, png: Bytes) -> AppResult<String>;
}
