use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_notification, get_notifications, get_preferences, mark_read, send_batch, set_preference,
};

pub fn init_notifications_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_notification).get(get_notifications))
        .route("/batch", post(send_batch))
        .route("/preferences", get(get_preferences).put(set_preference))
        .route("/{id}/read", post(mark_read))
}
