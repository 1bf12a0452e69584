//! # LearnHub Core
//!
//! Core types, errors, and utilities for the LearnHub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Salted password hashing and transport decoding
//! - [`file_storage`]: Storage backends for uploaded media
//!
//! # Example
//!
//! ```ignore
//! use learnhub_core::errors::AppError;
//! use learnhub_core::password::{decode_transport_password, hash_password};
//!
//! let plain = decode_transport_password("c2VjcmV0MTIz")?;
//! let (hash, salt) = hash_password(&plain)?;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! ```

pub mod errors;
pub mod file_storage;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use password::{decode_transport_password, hash_password, verify_password};
