//! File storage abstraction layer.
//!
//! Uploaded media goes through the [`FileStorage`] trait so the video
//! service does not care whether bytes land on a local disk or in a bucket.
//! A backend stores content under a key and hands back a public URL for it.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_core::file_storage::{FileStorage, LocalFileStorage, unique_upload_key};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::new(
//!     PathBuf::from("./storage/media"),
//!     "http://localhost:3000/media".to_string(),
//! );
//!
//! let key = unique_upload_key("uploads", "lecture-1.mp4", 1_700_000_000_000);
//! storage.save(&key, &bytes).await?;
//! let url = storage.get_url(&key)?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use axum::http::StatusCode;
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::errors::AppError;

/// The only media type accepted for video uploads.
pub const VIDEO_MIME_TYPE: &str = "video/mp4";

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync + fmt::Debug {
    /// Save file content under `key` and return the key.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Delete a file by key. Missing files are not an error.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;

    /// Public URL for a stored key.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// MIME type not allowed.
    InvalidMimeType {
        received: String,
        allowed: Vec<String>,
    },

    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// Invalid storage key format.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::InvalidMimeType { received, allowed } => {
                write!(
                    f,
                    "MIME type '{}' not allowed. Allowed types: {}",
                    received,
                    allowed.join(", ")
                )
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl StorageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidFileSize { .. } | Self::InvalidMimeType { .. } => StatusCode::BAD_REQUEST,
            Self::IoError(_) | Self::InvalidKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_app_error(self) -> AppError {
        let status = self.status();
        AppError::new(status, self)
    }
}

/// Rejects anything but [`VIDEO_MIME_TYPE`].
pub fn ensure_video_mime(received: Option<&str>) -> Result<(), StorageError> {
    match received {
        Some(VIDEO_MIME_TYPE) => Ok(()),
        other => Err(StorageError::InvalidMimeType {
            received: other.unwrap_or("none").to_string(),
            allowed: vec![VIDEO_MIME_TYPE.to_string()],
        }),
    }
}

/// Builds `<prefix>/<sha256(uploaded_at_ms-nonce-original_name)><.ext>`.
///
/// The extension is taken from the original name when it is plain ASCII
/// alphanumeric; anything else is dropped.
pub fn content_addressed_key(
    prefix: &str,
    original_name: &str,
    uploaded_at_ms: i64,
    nonce: u64,
) -> String {
    let digest = Sha256::digest(
        format!("{}-{:016x}-{}", uploaded_at_ms, nonce, original_name).as_bytes(),
    );
    let name = hex::encode(digest);

    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{}/{}{}", prefix.trim_end_matches('/'), name, extension)
}

/// [`content_addressed_key`] with a random nonce, so two uploads of the
/// same name in the same millisecond never share an object.
pub fn unique_upload_key(prefix: &str, original_name: &str, uploaded_at_ms: i64) -> String {
    content_addressed_key(prefix, original_name, uploaded_at_ms, rand::random())
}

/// Local filesystem-based file storage.
///
/// Files are written below `base_dir` and served by the API under
/// `base_url`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    /// 500 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: usize = 500 * 1024 * 1024;

    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_max_size(base_dir, base_url, Self::DEFAULT_MAX_FILE_SIZE)
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Validate storage key format to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(&file_path, content).await?;

            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}
