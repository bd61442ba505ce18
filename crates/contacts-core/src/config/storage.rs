//! Avatar storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded avatars live and how they are exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored files.
    #[serde(default = "default_root")]
    pub root: String,
    /// Base URL under which the root is served (no trailing slash).
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Edge length in pixels of the square avatar.
    #[serde(default = "default_avatar_size")]
    pub avatar_size: u32,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_base_url: default_public_base_url(),
            avatar_size: default_avatar_size(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root() -> String {
    "./data".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_avatar_size() -> u32 {
    250
}

fn default_max_upload() -> u64 {
    5 * 1024 * 1024
}
