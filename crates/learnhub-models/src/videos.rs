//! Video models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Video {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// Object key inside the media store; internal only.
    #[serde(skip)]
    pub storage_key: String,
    pub upload_date: DateTime<Utc>,
}

/// Validated fields of an upload, collected from the multipart form.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original_name: String,
    pub content: Vec<u8>,
}

/// Multipart form accepted by the upload endpoint (documentation only).
#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadVideoForm {
    /// The `video/mp4` file.
    #[schema(value_type = String, format = Binary)]
    pub video: Vec<u8>,
    #[serde(rename = "courseId")]
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadVideoResponse {
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub video: Video,
}

/// Partial video update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct VideoPatch {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl VideoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
