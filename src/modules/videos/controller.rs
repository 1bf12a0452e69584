use anyhow::anyhow;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
};
use tracing::instrument;
use uuid::Uuid;

use learnhub_core::AppError;
use learnhub_core::file_storage::{StorageError, ensure_video_mime};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireEducator;
use crate::modules::courses::service::CourseService;
use crate::modules::users::model::MessageResponse;
use crate::modules::videos::model::{
    NewVideo, UploadVideoForm, UploadVideoResponse, Video, VideoPatch,
};
use crate::modules::videos::service::VideoService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedMultipart, ValidatedPath};

fn multipart_error(e: MultipartError) -> AppError {
    AppError::new(e.status(), anyhow!(e.body_text()))
}

/// Collects the upload form. The MIME type of the `video` part is checked
/// before its bytes are read.
async fn read_upload_form(mut multipart: Multipart) -> Result<NewVideo, AppError> {
    let mut video: Option<(String, Vec<u8>)> = None;
    let mut course_id: Option<String> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "video" => {
                ensure_video_mime(field.content_type()).map_err(StorageError::into_app_error)?;
                let original_name = field.file_name().unwrap_or("video.mp4").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                video = Some((original_name, bytes.to_vec()));
            }
            "courseId" => course_id = Some(field.text().await.map_err(multipart_error)?),
            "title" => title = Some(field.text().await.map_err(multipart_error)?),
            "description" => description = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let (original_name, content) =
        video.ok_or_else(|| AppError::bad_request(anyhow!("video is required")))?;

    let course_id = course_id
        .ok_or_else(|| AppError::bad_request(anyhow!("courseId is required")))?;
    let course_id = Uuid::parse_str(course_id.trim())
        .map_err(|_| AppError::bad_request(anyhow!("courseId must be a valid UUID")))?;

    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request(anyhow!("title is required")))?;

    Ok(NewVideo {
        course_id,
        title,
        description: description.filter(|d| !d.trim().is_empty()),
        original_name,
        content,
    })
}

#[utoipa::path(
    post,
    path = "/api/video/upload",
    request_body(content = UploadVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video stored and attached to the course", body = UploadVideoResponse),
        (status = 400, description = "Missing field, invalid course id, or file is not video/mp4"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role and course ownership"),
        (status = 404, description = "Course not found"),
        (status = 413, description = "Upload too large")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, multipart))]
pub async fn upload_video(
    State(state): State<AppState>,
    RequireEducator(auth_user): RequireEducator,
    ValidatedMultipart(multipart): ValidatedMultipart,
) -> Result<Json<UploadVideoResponse>, AppError> {
    let new_video = read_upload_form(multipart).await?;

    let manager_id = CourseService::get_manager_id(&state.db, new_video.course_id).await?;
    auth_user.ensure_owner(manager_id)?;

    let video = VideoService::upload_video(&state.db, state.storage.as_ref(), new_video).await?;

    Ok(Json(UploadVideoResponse {
        file_path: video.url.clone(),
        video,
    }))
}

#[utoipa::path(
    get,
    path = "/api/video/get-videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Videos of the course", body = Vec<Video>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_videos(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<Vec<Video>>, AppError> {
    let videos = VideoService::get_videos_by_course(&state.db, id).await?;
    Ok(Json(videos))
}

#[utoipa::path(
    delete,
    path = "/api/video/delete-video/{course_id}/{id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role and course ownership"),
        (status = 404, description = "Course or video not found")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_video(
    State(state): State<AppState>,
    RequireEducator(auth_user): RequireEducator,
    ValidatedPath((course_id, id)): ValidatedPath<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    let owner_id = auth_user.user_id()?;
    VideoService::delete_video(&state.db, state.storage.as_ref(), owner_id, course_id, id).await?;
    Ok(Json(MessageResponse::new("Video deleted successfully")))
}

#[utoipa::path(
    put,
    path = "/api/video/update-video/{course_id}/{id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = VideoPatch,
    responses(
        (status = 200, description = "Video updated", body = Video),
        (status = 400, description = "No fields to update or validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role"),
        (status = 404, description = "Video not found in a course owned by caller")
    ),
    tag = "Videos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_video(
    State(state): State<AppState>,
    RequireEducator(auth_user): RequireEducator,
    ValidatedPath((course_id, id)): ValidatedPath<(Uuid, Uuid)>,
    ValidatedJson(patch): ValidatedJson<VideoPatch>,
) -> Result<Json<Video>, AppError> {
    let owner_id = auth_user.user_id()?;
    let video = VideoService::update_video(&state.db, owner_id, course_id, id, patch).await?;
    Ok(Json(video))
}
