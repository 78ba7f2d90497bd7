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
    AttendanceFilterParams, AttendanceRecord, PaginatedAttendanceResponse, RecordAttendanceDto,
    UpdateAttendanceDto,
};
use super::service::AttendanceService;

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = RecordAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Invalid input or duplicate record"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn record_attendance(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<RecordAttendanceDto>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let record = AttendanceService::record_attendance(&state.db, &ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(
        ("student_id" = Option<Uuid>, Query, description = "Restrict to one student (staff-level roles)"),
        ("from" = Option<String>, Query, description = "Start date (inclusive)"),
        ("to" = Option<String>, Query, description = "End date (inclusive)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "Attendance visible to the caller", body = PaginatedAttendanceResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Query(filters): Query<AttendanceFilterParams>,
) -> Result<Json<PaginatedAttendanceResponse>, AppError> {
    let records = AttendanceService::list_attendance(&state.db, &ctx, filters).await?;

    Ok(Json(records))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id" = Uuid, Path, description = "Attendance record ID")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Attendance updated", body = AttendanceRecord),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_attendance(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateAttendanceDto>,
) -> Result<Json<AttendanceRecord>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let record = AttendanceService::update_attendance(&state.db, &ctx, id, dto).await?;

    Ok(Json(record))
}
