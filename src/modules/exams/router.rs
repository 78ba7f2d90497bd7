use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_exam_template, delete_exam_template, get_exam_template_by_id, get_exam_templates,
    update_exam_template,
};

pub fn init_exam_templates_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exam_template).get(get_exam_templates))
        .route(
            "/{id}",
            get(get_exam_template_by_id)
                .put(update_exam_template)
                .delete(delete_exam_template),
        )
}
