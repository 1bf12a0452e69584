use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, RegisterRequest, TokenResponse};
use crate::modules::courses::model::{Course, CoursePatch, CreateCourseDto};
use crate::modules::users::model::{
    MessageResponse, Role, UpdatePasswordDto, UpdateUsernameDto, User,
};
use crate::modules::videos::model::{UploadVideoForm, UploadVideoResponse, Video, VideoPatch};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_username,
        crate::modules::users::controller::update_password,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_my_courses,
        crate::modules::courses::controller::get_all_courses,
        crate::modules::courses::controller::get_subscribed_courses,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::subscribe_course,
        crate::modules::courses::controller::unsubscribe_course,
        crate::modules::videos::controller::upload_video,
        crate::modules::videos::controller::get_videos,
        crate::modules::videos::controller::delete_video,
        crate::modules::videos::controller::update_video,
    ),
    components(
        schemas(
            Role,
            User,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            UpdateUsernameDto,
            UpdatePasswordDto,
            MessageResponse,
            ErrorResponse,
            Course,
            CreateCourseDto,
            CoursePatch,
            Video,
            VideoPatch,
            UploadVideoForm,
            UploadVideoResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profile of the calling user"),
        (name = "Courses", description = "Course management and subscriptions"),
        (name = "Videos", description = "Course video upload and management")
    ),
    info(
        title = "LearnHub API",
        version = "0.1.0",
        description = "Learning platform API: educators publish courses and videos, learners subscribe to them.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
