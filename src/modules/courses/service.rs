use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use learnhub_core::AppError;

use crate::metrics;
use crate::modules::courses::model::{Course, CoursePatch, CreateCourseDto};

/// Course columns plus the aggregated membership and video id sets.
/// Expects the course row to be aliased as `c`.
const COURSE_FIELDS: &str = r#"c.id, c.name, c.description, c.manager_user_id, c.creation_date,
    ARRAY(SELECT s.learner_id FROM course_subscriptions s
          WHERE s.course_id = c.id ORDER BY s.subscribed_at) AS student_ids,
    ARRAY(SELECT v.id FROM videos v
          WHERE v.course_id = c.id ORDER BY v.upload_date) AS video_ids"#;

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found"))
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn create_course(
        db: &PgPool,
        owner_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let query = format!(
            r#"WITH c AS (
                   INSERT INTO courses (name, description, manager_user_id)
                   VALUES ($1, $2, $3)
                   RETURNING *
               )
               SELECT {} FROM c"#,
            COURSE_FIELDS
        );

        let course = sqlx::query_as::<_, Course>(&query)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(owner_id)
            .fetch_one(db)
            .await?;

        metrics::track_course_created();

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get_courses_by_manager(
        db: &PgPool,
        owner_id: Uuid,
    ) -> Result<Vec<Course>, AppError> {
        let query = format!(
            "SELECT {} FROM courses c WHERE c.manager_user_id = $1 ORDER BY c.creation_date",
            COURSE_FIELDS
        );

        let courses = sqlx::query_as::<_, Course>(&query)
            .bind(owner_id)
            .fetch_all(db)
            .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_all_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let query = format!(
            "SELECT {} FROM courses c ORDER BY c.creation_date",
            COURSE_FIELDS
        );

        let courses = sqlx::query_as::<_, Course>(&query).fetch_all(db).await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_subscribed_courses(
        db: &PgPool,
        learner_id: Uuid,
    ) -> Result<Vec<Course>, AppError> {
        let query = format!(
            r#"SELECT {} FROM courses c
               JOIN course_subscriptions cs ON cs.course_id = c.id
               WHERE cs.learner_id = $1
               ORDER BY cs.subscribed_at"#,
            COURSE_FIELDS
        );

        let courses = sqlx::query_as::<_, Course>(&query)
            .bind(learner_id)
            .fetch_all(db)
            .await?;

        Ok(courses)
    }

    /// Applies `patch` to a course the caller manages.
    ///
    /// A course that does not exist and a course owned by someone else are
    /// both reported as 404.
    #[instrument(skip(db))]
    pub async fn update_course(
        db: &PgPool,
        owner_id: Uuid,
        course_id: Uuid,
        patch: CoursePatch,
    ) -> Result<Course, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("No fields to update")));
        }

        let query = format!(
            r#"WITH c AS (
                   UPDATE courses
                   SET name = COALESCE($1, name),
                       description = COALESCE($2, description)
                   WHERE id = $3 AND manager_user_id = $4
                   RETURNING *
               )
               SELECT {} FROM c"#,
            COURSE_FIELDS
        );

        sqlx::query_as::<_, Course>(&query)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(course_id)
            .bind(owner_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(course_not_found)
    }

    /// Deletes a course the caller manages. Videos and subscriptions go with it.
    #[instrument(skip(db))]
    pub async fn delete_course(
        db: &PgPool,
        owner_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND manager_user_id = $2")
            .bind(course_id)
            .bind(owner_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(course_not_found());
        }

        Ok(())
    }

    /// Returns the manager of a course, or 404.
    #[instrument(skip(db))]
    pub async fn get_manager_id(db: &PgPool, course_id: Uuid) -> Result<Uuid, AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT manager_user_id FROM courses WHERE id = $1")
            .bind(course_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(course_not_found)
    }

    /// Adds the learner to the course. Subscribing twice is a no-op.
    #[instrument(skip(db))]
    pub async fn subscribe(db: &PgPool, learner_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        Self::get_manager_id(db, course_id).await?;

        sqlx::query(
            r#"INSERT INTO course_subscriptions (course_id, learner_id)
               VALUES ($1, $2)
               ON CONFLICT (course_id, learner_id) DO NOTHING"#,
        )
        .bind(course_id)
        .bind(learner_id)
        .execute(db)
        .await
        .map_err(|e| {
            // The course was deleted between the lookup and the insert.
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return course_not_found();
            }
            AppError::from(e)
        })?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn unsubscribe(
        db: &PgPool,
        learner_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        Self::get_manager_id(db, course_id).await?;

        sqlx::query("DELETE FROM course_subscriptions WHERE course_id = $1 AND learner_id = $2")
            .bind(course_id)
            .bind(learner_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
