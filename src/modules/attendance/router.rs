use axum::{
    Router,
    routing::{post, put},
};

use crate::state::AppState;

use super::controller::{get_attendance, record_attendance, update_attendance};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_attendance).get(get_attendance))
        .route("/{id}", put(update_attendance))
}
