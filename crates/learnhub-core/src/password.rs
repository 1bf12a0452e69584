//! Password hashing with an explicit, persisted salt.
//!
//! Each user owns a random 16-byte bcrypt salt stored hex-encoded next to the
//! hash. Registration generates a fresh salt; password changes reuse the
//! stored one.
//!
//! Passwords arrive base64-encoded from clients. That encoding is transport
//! obfuscation only and gives no confidentiality; [`decode_transport_password`]
//! undoes it before hashing.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bcrypt::{Version, hash_with_salt, verify};
use rand::RngCore;

use crate::errors::AppError;

/// bcrypt work factor.
pub const HASH_COST: u32 = 10;

const SALT_LEN: usize = 16;

/// Generates a new random salt, hex-encoded for storage.
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    hex::encode(salt)
}

fn parse_salt(salt: &str) -> Result<[u8; SALT_LEN], AppError> {
    let bytes = hex::decode(salt)
        .map_err(|e| AppError::internal_error(format!("Stored salt is not valid hex: {}", e)))?;

    bytes
        .try_into()
        .map_err(|_| AppError::internal_error("Stored salt has the wrong length".to_string()))
}

/// Hashes `password` under the given hex salt.
pub fn hash_password_with_salt(password: &str, salt: &str) -> Result<String, AppError> {
    let salt = parse_salt(salt)?;

    hash_with_salt(password, HASH_COST, salt)
        .map(|parts| parts.format_for_version(Version::TwoB))
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Generates a salt and hashes `password` with it, returning `(hash, salt)`.
pub fn hash_password(password: &str) -> Result<(String, String), AppError> {
    let salt = generate_salt();
    let hash = hash_password_with_salt(password, &salt)?;
    Ok((hash, salt))
}

/// Checks `password` against a stored hash.
///
/// The hash embeds the salt it was produced with, so this is equivalent to
/// rehashing under the stored salt; the comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Decodes the base64 transport encoding of a client-supplied password.
pub fn decode_transport_password(encoded: &str) -> Result<String, AppError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Password must be base64-encoded")))?;

    String::from_utf8(bytes)
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Password must be valid UTF-8")))
}
