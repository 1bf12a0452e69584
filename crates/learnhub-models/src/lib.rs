//! # LearnHub Models
//!
//! Database entities and request/response DTOs shared by the API and CLI.
//!
//! - [`auth`]: registration and login payloads
//! - [`users`]: user profile entity and update DTOs
//! - [`courses`]: courses and course patches
//! - [`videos`]: videos, upload form, video patches

pub mod auth;
pub mod courses;
pub mod users;
pub mod videos;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, RegisterRequest, TokenResponse};
pub use courses::{Course, CoursePatch, CreateCourseDto};
pub use users::{
    MessageResponse, Role, UpdatePasswordDto, UpdateUsernameDto, User, UserCredentials,
};
pub use videos::{NewVideo, UploadVideoForm, UploadVideoResponse, Video, VideoPatch};
