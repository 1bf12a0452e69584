//! Authorization guard.
//!
//! Every protected route goes through the same four steps, implemented once
//! as extractors:
//!
//! 1. [`auth::AuthUser`] reads `Authorization: Bearer <token>` (401 if absent)
//! 2. and verifies the token (401 if invalid or expired).
//! 3. [`role::RequireEducator`] / [`role::RequireLearner`] compare the role
//!    claim with the route's required role (403 on mismatch).
//! 4. [`auth::AuthUser::ensure_owner`] compares the caller with a resource
//!    owner (403 on mismatch). Services that scope a single write statement
//!    by owner report a miss as 404 instead.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::RequireEducator;
//!
//! async fn create_course(
//!     State(state): State<AppState>,
//!     RequireEducator(auth_user): RequireEducator,
//! ) -> Result<Json<Course>, AppError> {
//!     let owner_id = auth_user.user_id()?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod role;
