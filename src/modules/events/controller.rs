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
    CreateEventDto, Event, EventFilterParams, PaginatedEventsResponse, UpdateEventDto,
};
use super::service::EventService;

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Events",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_event(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<CreateEventDto>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let event = EventService::create_event(&state.db, &ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(
        ("search" = Option<String>, Query, description = "Title search"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("offset" = Option<i64>, Query, description = "Items to skip")
    ),
    responses(
        (status = 200, description = "List of events", body = PaginatedEventsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Events",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_events(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Query(filters): Query<EventFilterParams>,
) -> Result<Json<PaginatedEventsResponse>, AppError> {
    let events = EventService::list_events(&state.db, &ctx, filters).await?;

    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    tag = "Events",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_event_by_id(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = EventService::get_event_by_id(&state.db, &ctx, id).await?;

    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Events",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_event(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateEventDto>,
) -> Result<Json<Event>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let event = EventService::update_event(&state.db, &ctx, id, dto).await?;

    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Events",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    EventService::delete_event(&state.db, &ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
