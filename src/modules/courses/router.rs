use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, get_all_courses, get_my_courses, get_subscribed_courses,
    subscribe_course, unsubscribe_course, update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/create-course", post(create_course))
        .route("/get-courses/me", get(get_my_courses))
        .route("/get-courses/all", get(get_all_courses))
        .route("/get-courses/subscribed", get(get_subscribed_courses))
        .route("/update-course/{id}", put(update_course))
        .route("/delete-course/{id}", delete(delete_course))
        .route("/subscribe-course/{id}", put(subscribe_course))
        .route("/unsubscribe-course/{id}", put(unsubscribe_course))
}
