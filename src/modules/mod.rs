pub mod auth;
pub mod courses;
pub mod users;
pub mod videos;
