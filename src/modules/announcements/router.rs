use axum::{
    Router,
    routing::{post, put},
};

use crate::state::AppState;

use super::controller::{
    create_announcement, delete_announcement, get_announcements, update_announcement,
};

pub fn init_announcements_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_announcement).get(get_announcements))
        .route("/{id}", put(update_announcement).delete(delete_announcement))
}
