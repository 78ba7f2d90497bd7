use axum::{Json, extract::State};
use tracing::instrument;
use validator::Validate;

use scholaris_core::AppError;

use crate::state::AppState;

use super::model::{LoginRequest, LoginResponse};
use super::service::AuthService;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = LoginResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let response = AuthService::login(&state.db, &state.jwt_config, dto).await?;

    Ok(Json(response))
}
