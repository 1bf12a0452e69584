//! Course models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A course with its subscriber and video id sets.
///
/// `student_ids` and `video_ids` are aggregated from `course_subscriptions`
/// and `videos` at query time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub manager_user_id: Uuid,
    pub creation_date: DateTime<Utc>,
    pub student_ids: Vec<Uuid>,
    pub video_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[serde(alias = "course_name")]
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    #[schema(example = "Algebra")]
    pub name: String,
    pub description: Option<String>,
}

/// Partial course update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CoursePatch {
    #[serde(default, alias = "course_name")]
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
