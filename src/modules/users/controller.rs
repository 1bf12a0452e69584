use axum::{Json, extract::State};
use tracing::instrument;

use learnhub_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::{
    MessageResponse, UpdatePasswordDto, UpdateUsernameDto, User,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/user/me",
    responses(
        (status = 200, description = "Current user profile", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user_id = auth_user.user_id()?;
    let user = UserService::get_user(&state.db, user_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/user/update-username",
    request_body = UpdateUsernameDto,
    responses(
        (status = 200, description = "Username updated", body = MessageResponse),
        (status = 400, description = "Validation error or username taken"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_username(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateUsernameDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    UserService::update_username(&state.db, user_id, &dto.username).await?;
    Ok(Json(MessageResponse::new("Username updated successfully")))
}

#[utoipa::path(
    put,
    path = "/api/user/update-password",
    request_body = UpdatePasswordDto,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Validation error or bad password encoding"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdatePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    UserService::update_password(&state.db, user_id, &dto.password).await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
