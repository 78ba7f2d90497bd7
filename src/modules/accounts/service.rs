use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::{
    Action, AppError, PaginationMeta, ResourceContext, ResourceKind, Role, TenantContext,
    assert_permission,
};

use super::model::{Account, AccountFilterParams, AssignRoleDto, PaginatedAccountsResponse};

const COLUMNS: &str =
    "id, school_id, email, first_name, last_name, role, locale, guardian_id, created_at";

pub struct AccountService;

impl AccountService {
    #[instrument(skip(db, ctx))]
    pub async fn list_accounts(
        db: &PgPool,
        ctx: &TenantContext,
        filters: AccountFilterParams,
    ) -> Result<PaginatedAccountsResponse, AppError> {
        assert_permission(ctx, Action::Read, None)?;

        let Some(school_id) = ctx.school_id() else {
            return Ok(PaginatedAccountsResponse {
                data: vec![],
                meta: PaginationMeta::new(0, &filters.pagination),
            });
        };

        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let search = filters
            .search
            .as_deref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());
        let role = filters.role.map(|r| r.as_str().to_string());

        let accounts = sqlx::query_as::<_, Account>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM users
            WHERE school_id = $1
              AND (first_name || ' ' || last_name || ' ' || email) ILIKE $2
              AND ($3::text IS NULL OR role = $3)
            ORDER BY last_name, first_name
            LIMIT $4 OFFSET $5
            "#,
        ))
        .bind(school_id)
        .bind(&search)
        .bind(&role)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE school_id = $1
              AND (first_name || ' ' || last_name || ' ' || email) ILIKE $2
              AND ($3::text IS NULL OR role = $3)
            "#,
        )
        .bind(school_id)
        .bind(&search)
        .bind(&role)
        .fetch_one(db)
        .await?;

        Ok(PaginatedAccountsResponse {
            data: accounts,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn get_account_by_id(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Account, AppError> {
        assert_permission(ctx, Action::Read, None)?;
        let school_id = ctx
            .school_id()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Account not found")))?;

        sqlx::query_as::<_, Account>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1 AND school_id = $2",
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Account not found")))
    }

    /// Changes a user's role within the caller's school.
    ///
    /// `developer` cannot be assigned over the API; it is reserved for the
    /// bootstrap CLI.
    #[instrument(skip(db, ctx))]
    pub async fn assign_role(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
        dto: AssignRoleDto,
    ) -> Result<Account, AppError> {
        if dto.role == Role::Developer {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "The developer role cannot be assigned"
            )));
        }

        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Account)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::AssignRole, Some(&resource))?;

        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE users
            SET role = $3, updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(school_id)
        .bind(dto.role.as_str())
        .fetch_optional(db)
        .await?;

        account.ok_or_else(|| {
            tracing::debug!(%id, "role assignment matched no row in caller's school");
            AppError::not_found(anyhow::anyhow!("Account not found"))
        })
    }
}
