use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use scholaris_core::AppError;

use crate::middleware::tenant::Tenant;
use crate::state::AppState;

use super::model::{
    Announcement, AnnouncementFilterParams, CreateAnnouncementDto,
    PaginatedAnnouncementsResponse, UpdateAnnouncementDto,
};
use super::service::AnnouncementService;

#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 201, description = "Announcement created", body = Announcement),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Announcements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_announcement(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<CreateAnnouncementDto>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let announcement = AnnouncementService::create_announcement(&state.db, &ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

#[utoipa::path(
    get,
    path = "/api/announcements",
    params(
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "Announcements visible to the caller", body = PaginatedAnnouncementsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Announcements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_announcements(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Query(filters): Query<AnnouncementFilterParams>,
) -> Result<Json<PaginatedAnnouncementsResponse>, AppError> {
    let announcements = AnnouncementService::list_announcements(&state.db, &ctx, filters).await?;

    Ok(Json(announcements))
}

#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    request_body = UpdateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement updated", body = Announcement),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Announcements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_announcement(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateAnnouncementDto>,
) -> Result<Json<Announcement>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let announcement = AnnouncementService::update_announcement(&state.db, &ctx, id, dto).await?;

    Ok(Json(announcement))
}

#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 204, description = "Announcement deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Announcements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AnnouncementService::delete_announcement(&state.db, &ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
