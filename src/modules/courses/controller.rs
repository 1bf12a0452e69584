use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use learnhub_core::AppError;

use crate::middleware::role::{RequireEducator, RequireLearner};
use crate::modules::courses::model::{Course, CoursePatch, CreateCourseDto};
use crate::modules::courses::service::CourseService;
use crate::modules::users::model::MessageResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    post,
    path = "/api/course/create-course",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireEducator(auth_user): RequireEducator,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let owner_id = auth_user.user_id()?;
    let course = CourseService::create_course(&state.db, owner_id, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/course/get-courses/me",
    responses(
        (status = 200, description = "Courses managed by the caller", body = Vec<Course>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_courses(
    State(state): State<AppState>,
    RequireEducator(auth_user): RequireEducator,
) -> Result<Json<Vec<Course>>, AppError> {
    let owner_id = auth_user.user_id()?;
    let courses = CourseService::get_courses_by_manager(&state.db, owner_id).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/course/get-courses/all",
    responses(
        (status = 200, description = "Every course", body = Vec<Course>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_all_courses(
    State(state): State<AppState>,
    RequireEducator(_auth_user): RequireEducator,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::get_all_courses(&state.db).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/course/get-courses/subscribed",
    responses(
        (status = 200, description = "Courses the caller is subscribed to", body = Vec<Course>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires learner role")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subscribed_courses(
    State(state): State<AppState>,
    RequireLearner(auth_user): RequireLearner,
) -> Result<Json<Vec<Course>>, AppError> {
    let learner_id = auth_user.user_id()?;
    let courses = CourseService::get_subscribed_courses(&state.db, learner_id).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    put,
    path = "/api/course/update-course/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CoursePatch,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "No fields to update or validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role"),
        (status = 404, description = "Course not found or not owned by caller")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    RequireEducator(auth_user): RequireEducator,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(patch): ValidatedJson<CoursePatch>,
) -> Result<Json<Course>, AppError> {
    let owner_id = auth_user.user_id()?;
    let course = CourseService::update_course(&state.db, owner_id, id, patch).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/course/delete-course/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires educator role"),
        (status = 404, description = "Course not found or not owned by caller")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    RequireEducator(auth_user): RequireEducator,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let owner_id = auth_user.user_id()?;
    CourseService::delete_course(&state.db, owner_id, id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}

#[utoipa::path(
    put,
    path = "/api/course/subscribe-course/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Subscribed", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires learner role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn subscribe_course(
    State(state): State<AppState>,
    RequireLearner(auth_user): RequireLearner,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let learner_id = auth_user.user_id()?;
    CourseService::subscribe(&state.db, learner_id, id).await?;
    Ok(Json(MessageResponse::new("Subscribed to course successfully")))
}

#[utoipa::path(
    put,
    path = "/api/course/unsubscribe-course/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Unsubscribed", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires learner role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn unsubscribe_course(
    State(state): State<AppState>,
    RequireLearner(auth_user): RequireLearner,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let learner_id = auth_user.user_id()?;
    CourseService::unsubscribe(&state.db, learner_id, id).await?;
    Ok(Json(MessageResponse::new("Unsubscribed from course successfully")))
}
