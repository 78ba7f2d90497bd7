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
    CreateExamTemplateDto, ExamTemplate, ExamTemplateFilterParams,
    PaginatedExamTemplatesResponse, UpdateExamTemplateDto,
};
use super::service::ExamTemplateService;

#[utoipa::path(
    post,
    path = "/api/exam-templates",
    request_body = CreateExamTemplateDto,
    responses(
        (status = 201, description = "Template created", body = ExamTemplate),
        (status = 400, description = "Invalid input or duplicate name"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Exam Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_exam_template(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(dto): Json<CreateExamTemplateDto>,
) -> Result<(StatusCode, Json<ExamTemplate>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let template = ExamTemplateService::create_template(&state.db, &ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    get,
    path = "/api/exam-templates",
    params(
        ("subject" = Option<String>, Query, description = "Subject search"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "List of templates", body = PaginatedExamTemplatesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Exam Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_exam_templates(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Query(filters): Query<ExamTemplateFilterParams>,
) -> Result<Json<PaginatedExamTemplatesResponse>, AppError> {
    let templates = ExamTemplateService::list_templates(&state.db, &ctx, filters).await?;

    Ok(Json(templates))
}

#[utoipa::path(
    get,
    path = "/api/exam-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template details", body = ExamTemplate),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    tag = "Exam Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_exam_template_by_id(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<ExamTemplate>, AppError> {
    let template = ExamTemplateService::get_template_by_id(&state.db, &ctx, id).await?;

    Ok(Json(template))
}

#[utoipa::path(
    put,
    path = "/api/exam-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    request_body = UpdateExamTemplateDto,
    responses(
        (status = 200, description = "Template updated", body = ExamTemplate),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Exam Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_exam_template(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateExamTemplateDto>,
) -> Result<Json<ExamTemplate>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let template = ExamTemplateService::update_template(&state.db, &ctx, id, dto).await?;

    Ok(Json(template))
}

#[utoipa::path(
    delete,
    path = "/api/exam-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Exam Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_exam_template(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ExamTemplateService::delete_template(&state.db, &ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
