use axum::{Json, extract::State};
use tracing::instrument;
use validator::Validate;

use scholaris_core::AppError;

use crate::middleware::tenant::Tenant;
use crate::state::AppState;

use super::model::{SchoolSettings, UpsertSettingsDto};
use super::service::SettingsService;

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "School settings", body = SchoolSettings),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
) -> Result<Json<SchoolSettings>, AppError> {
    let settings = SettingsService::get_settings(&state.db, &ctx).await?;

    Ok(Json(settings))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpsertSettingsDto,
    responses(
        (status = 200, description = "Settings saved", body = SchoolSettings),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn upsert_settings(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<UpsertSettingsDto>,
) -> Result<Json<SchoolSettings>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let settings = SettingsService::upsert_settings(&state.db, &ctx, dto).await?;

    Ok(Json(settings))
}
