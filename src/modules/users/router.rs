use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{get_profile, update_password, update_username};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile))
        .route("/update-username", put(update_username))
        .route("/update-password", put(update_password))
}
