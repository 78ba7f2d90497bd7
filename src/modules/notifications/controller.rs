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
    BatchSendResponse, CreateNotificationDto, Notification, NotificationFilterParams,
    NotificationPreference, PaginatedNotificationsResponse, SendBatchDto, SetPreferenceDto,
};
use super::service::NotificationService;

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(
        ("unread_only" = Option<bool>, Query, description = "Only unread notifications"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("offset" = Option<i64>, Query, description = "Items to skip")
    ),
    responses(
        (status = 200, description = "Caller's notifications", body = PaginatedNotificationsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_notifications(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Query(filters): Query<NotificationFilterParams>,
) -> Result<Json<PaginatedNotificationsResponse>, AppError> {
    let notifications = NotificationService::list_notifications(&state.db, &ctx, filters).await?;

    Ok(Json(notifications))
}

#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification sent", body = Notification),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Recipient not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_notification(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<CreateNotificationDto>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let notification = NotificationService::create_notification(&state.db, &ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

#[utoipa::path(
    post,
    path = "/api/notifications/batch",
    request_body = SendBatchDto,
    responses(
        (status = 200, description = "Batch result", body = BatchSendResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn send_batch(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<SendBatchDto>,
) -> Result<Json<BatchSendResponse>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let outcome = NotificationService::send_batch(&state.db, &ctx, dto).await?;

    Ok(Json(outcome))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = Notification),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let notification = NotificationService::mark_read(&state.db, &ctx, id).await?;

    Ok(Json(notification))
}

#[utoipa::path(
    get,
    path = "/api/notifications/preferences",
    responses(
        (status = 200, description = "Caller's preferences", body = Vec<NotificationPreference>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_preferences(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
) -> Result<Json<Vec<NotificationPreference>>, AppError> {
    let preferences = NotificationService::list_preferences(&state.db, &ctx).await?;

    Ok(Json(preferences))
}

#[utoipa::path(
    put,
    path = "/api/notifications/preferences",
    request_body = SetPreferenceDto,
    responses(
        (status = 200, description = "Preference saved", body = NotificationPreference),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_preference(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<SetPreferenceDto>,
) -> Result<Json<NotificationPreference>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let preference = NotificationService::set_preference(&state.db, &ctx, dto).await?;

    Ok(Json(preference))
}
