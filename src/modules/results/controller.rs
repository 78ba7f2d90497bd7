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
    CreateResultDto, PaginatedResultsResponse, ResultFilterParams, ResultRecord, UpdateResultDto,
};
use super::service::ResultService;

#[utoipa::path(
    post,
    path = "/api/results",
    request_body = CreateResultDto,
    responses(
        (status = 201, description = "Result recorded", body = ResultRecord),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_result(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<CreateResultDto>,
) -> Result<(StatusCode, Json<ResultRecord>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let record = ResultService::create_result(&state.db, &ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/results",
    params(
        ("student_id" = Option<Uuid>, Query, description = "Restrict to one student (staff-level roles)"),
        ("subject" = Option<String>, Query, description = "Subject search"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "Results visible to the caller", body = PaginatedResultsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_results(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Query(filters): Query<ResultFilterParams>,
) -> Result<Json<PaginatedResultsResponse>, AppError> {
    let results = ResultService::list_results(&state.db, &ctx, filters).await?;

    Ok(Json(results))
}

#[utoipa::path(
    put,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result ID")),
    request_body = UpdateResultDto,
    responses(
        (status = 200, description = "Result updated", body = ResultRecord),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_result(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateResultDto>,
) -> Result<Json<ResultRecord>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let record = ResultService::update_result(&state.db, &ctx, id, dto).await?;

    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(("id" = Uuid, Path, description = "Result ID")),
    responses(
        (status = 204, description = "Result deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_result(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ResultService::delete_result(&state.db, &ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
