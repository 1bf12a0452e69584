//! Media storage settings.
//!
//! Uploaded videos are written below `STORAGE_DIR` and served back under
//! `STORAGE_PUBLIC_URL`, which must point at the `/media` route of this API
//! (or at whatever fronts that directory in production).

use std::env;
use std::path::PathBuf;

use crate::env_or;

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub base_dir: PathBuf,
    pub public_url: String,
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("storage/media"),
            public_url: "http://localhost:3000/media".to_string(),
            max_upload_bytes: 500 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.base_dir),
            public_url: env::var("STORAGE_PUBLIC_URL").unwrap_or(defaults.public_url),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
        }
    }
}
