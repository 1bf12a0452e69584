use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{delete_video, get_videos, update_video, upload_video};

/// Video routes. `max_upload_bytes` bounds the upload request body.
pub fn init_videos_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload_video).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/get-videos/{id}", get(get_videos))
        .route("/delete-video/{course_id}/{id}", delete(delete_video))
        .route("/update-video/{course_id}/{id}", put(update_video))
}
