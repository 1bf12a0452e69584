//! # LearnHub Auth
//!
//! Token types and JWT utilities for the LearnHub API.
//!
//! - [`claims`]: the [`Claims`] payload and the [`Role`] enum
//! - [`jwt`]: [`issue_token`] and [`verify_token`]

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, Role};
pub use jwt::{issue_token, verify_token};
