use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::AppError;

use crate::middleware::tenant::Tenant;
use crate::state::AppState;

use super::model::{Account, AccountFilterParams, AssignRoleDto, PaginatedAccountsResponse};
use super::service::AccountService;

#[utoipa::path(
    get,
    path = "/api/accounts",
    params(
        ("search" = Option<String>, Query, description = "Name or email search"),
        ("role" = Option<String>, Query, description = "Restrict to one role"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("offset" = Option<i64>, Query, description = "Items to skip")
    ),
    responses(
        (status = 200, description = "Accounts in the caller's school", body = PaginatedAccountsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_accounts(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Query(filters): Query<AccountFilterParams>,
) -> Result<Json<PaginatedAccountsResponse>, AppError> {
    let accounts = AccountService::list_accounts(&state.db, &ctx, filters).await?;

    Ok(Json(accounts))
}

#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account details", body = Account),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_account_by_id(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account = AccountService::get_account_by_id(&state.db, &ctx, id).await?;

    Ok(Json(account))
}

#[utoipa::path(
    patch,
    path = "/api/accounts/{id}/role",
    params(("id" = Uuid, Path, description = "Account ID")),
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Role updated", body = Account),
        (status = 400, description = "Invalid role"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn assign_role(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Path(id): Path<Uuid>,
    Json(dto): Json<AssignRoleDto>,
) -> Result<Json<Account>, AppError> {
    let account = AccountService::assign_role(&state.db, &ctx, id, dto).await?;

    Ok(Json(account))
}
