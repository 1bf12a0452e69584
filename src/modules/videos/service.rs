use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use learnhub_core::file_storage::{StorageError, unique_upload_key};
use learnhub_core::{AppError, FileStorage};

use crate::metrics;
use crate::modules::videos::model::{NewVideo, Video, VideoPatch};

const UPLOAD_PREFIX: &str = "uploads";

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found"))
}

fn video_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Video not found"))
}

pub struct VideoService;

impl VideoService {
    /// Stores the file, then inserts the row that attaches it to the course.
    ///
    /// Course ownership is checked by the caller. If the insert fails the
    /// stored object is removed again.
    #[instrument(skip(db, storage, new_video), fields(course_id = %new_video.course_id, bytes = new_video.content.len()))]
    pub async fn upload_video(
        db: &PgPool,
        storage: &dyn FileStorage,
        new_video: NewVideo,
    ) -> Result<Video, AppError> {
        let uploaded_at = Utc::now();
        let key = unique_upload_key(
            UPLOAD_PREFIX,
            &new_video.original_name,
            uploaded_at.timestamp_millis(),
        );
        let url = storage.get_url(&key).map_err(StorageError::into_app_error)?;

        storage
            .save(&key, &new_video.content)
            .await
            .map_err(StorageError::into_app_error)?;

        let inserted = sqlx::query_as::<_, Video>(
            r#"INSERT INTO videos (course_id, title, description, url, storage_key, upload_date)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, course_id, title, description, url, storage_key, upload_date"#,
        )
        .bind(new_video.course_id)
        .bind(&new_video.title)
        .bind(&new_video.description)
        .bind(&url)
        .bind(&key)
        .bind(uploaded_at)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(video) => {
                metrics::track_video_uploaded(new_video.content.len());
                info!(video_id = %video.id, key = %key, "Video uploaded");
                Ok(video)
            }
            Err(e) => {
                if let Err(cleanup) = storage.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned upload");
                }

                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return Err(course_not_found());
                }
                Err(AppError::from(e))
            }
        }
    }

    #[instrument(skip(db))]
    pub async fn get_videos_by_course(db: &PgPool, course_id: Uuid) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>(
            r#"SELECT id, course_id, title, description, url, storage_key, upload_date
               FROM videos
               WHERE course_id = $1
               ORDER BY upload_date"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(videos)
    }

    /// Removes a video from a course the caller manages.
    ///
    /// Checks and delete run in one transaction; the stored object is removed
    /// after commit and a failure there is only logged.
    #[instrument(skip(db, storage))]
    pub async fn delete_video(
        db: &PgPool,
        storage: &dyn FileStorage,
        owner_id: Uuid,
        course_id: Uuid,
        video_id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let manager_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT manager_user_id FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(course_not_found)?;

        if manager_id != owner_id {
            return Err(AppError::forbidden(
                "Access denied. You do not own this course.".to_string(),
            ));
        }

        let storage_key = sqlx::query_scalar::<_, String>(
            "DELETE FROM videos WHERE id = $1 AND course_id = $2 RETURNING storage_key",
        )
        .bind(video_id)
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(video_not_found)?;

        tx.commit().await?;

        if let Err(e) = storage.delete(&storage_key).await {
            warn!(key = %storage_key, error = %e, "Failed to delete stored video");
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn update_video(
        db: &PgPool,
        owner_id: Uuid,
        course_id: Uuid,
        video_id: Uuid,
        patch: VideoPatch,
    ) -> Result<Video, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("No fields to update")));
        }

        sqlx::query_as::<_, Video>(
            r#"UPDATE videos v
               SET title = COALESCE($1, v.title),
                   description = COALESCE($2, v.description)
               FROM courses c
               WHERE v.id = $3
                 AND v.course_id = $4
                 AND c.id = v.course_id
                 AND c.manager_user_id = $5
               RETURNING v.id, v.course_id, v.title, v.description, v.url, v.storage_key, v.upload_date"#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(video_id)
        .bind(course_id)
        .bind(owner_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(video_not_found)
    }
}
