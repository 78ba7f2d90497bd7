use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{assign_role, get_account_by_id, get_accounts};

pub fn init_accounts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_accounts))
        .route("/{id}", get(get_account_by_id))
        .route("/{id}/role", patch(assign_role))
}
