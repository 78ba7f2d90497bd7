use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::{
    Action, AppError, PaginationMeta, ResourceContext, ResourceKind, Role, TenantContext,
    assert_permission,
};

use super::model::{
    CreateResultDto, PaginatedResultsResponse, ResultFilterParams, ResultRecord, UpdateResultDto,
};

const COLUMNS: &str =
    "id, school_id, student_id, subject, term, score, max_score, graded_by, created_at, updated_at";

pub struct ResultService;

impl ResultService {
    #[instrument(skip(db, ctx))]
    pub async fn create_result(
        db: &PgPool,
        ctx: &TenantContext,
        dto: CreateResultDto,
    ) -> Result<ResultRecord, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Result).in_school(school_id);
        assert_permission(ctx, Action::Create, Some(&resource))?;

        if dto.score > dto.max_score {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Score cannot exceed max score"
            )));
        }

        // The INSERT..SELECT pins the student to the caller's school in one
        // statement; a student from another school reads as "not found".
        let record = sqlx::query_as::<_, ResultRecord>(&format!(
            r#"
            INSERT INTO results (school_id, student_id, subject, term, score, max_score, graded_by)
            SELECT $1, u.id, $3, $4, $5, $6, $7
            FROM users u
            WHERE u.id = $2 AND u.school_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(school_id)
        .bind(dto.student_id)
        .bind(&dto.subject)
        .bind(&dto.term)
        .bind(dto.score)
        .bind(dto.max_score)
        .bind(ctx.user_id())
        .fetch_optional(db)
        .await?;

        record.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    /// Lists results. Staff-level roles may filter across the school;
    /// students see only their own records and guardians only their wards'.
    #[instrument(skip(db, ctx))]
    pub async fn list_results(
        db: &PgPool,
        ctx: &TenantContext,
        filters: ResultFilterParams,
    ) -> Result<PaginatedResultsResponse, AppError> {
        assert_permission(ctx, Action::Read, None)?;

        let Some(school_id) = ctx.school_id() else {
            return Ok(PaginatedResultsResponse {
                data: vec![],
                meta: PaginationMeta::new(0, &filters.pagination),
            });
        };

        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let subject = filters
            .subject
            .as_deref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let staff_level = matches!(
            ctx.role(),
            Role::Developer | Role::Admin | Role::Teacher | Role::Accountant | Role::Staff
        );

        let (rows, total) = match ctx.role() {
            _ if staff_level => {
                let rows = sqlx::query_as::<_, ResultRecord>(&format!(
                    r#"
                    SELECT {COLUMNS} FROM results
                    WHERE school_id = $1
                      AND ($2::uuid IS NULL OR student_id = $2)
                      AND subject ILIKE $3
                    ORDER BY created_at DESC
                    LIMIT $4 OFFSET $5
                    "#
                ))
                .bind(school_id)
                .bind(filters.student_id)
                .bind(&subject)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?;

                let total = sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COUNT(*) FROM results
                    WHERE school_id = $1
                      AND ($2::uuid IS NULL OR student_id = $2)
                      AND subject ILIKE $3
                    "#,
                )
                .bind(school_id)
                .bind(filters.student_id)
                .bind(&subject)
                .fetch_one(db)
                .await?;

                (rows, total)
            }
            Role::Student => {
                // Own records only; the student_id filter is ignored.
                let rows = sqlx::query_as::<_, ResultRecord>(&format!(
                    r#"
                    SELECT {COLUMNS} FROM results
                    WHERE school_id = $1 AND student_id = $2 AND subject ILIKE $3
                    ORDER BY created_at DESC
                    LIMIT $4 OFFSET $5
                    "#
                ))
                .bind(school_id)
                .bind(ctx.user_id())
                .bind(&subject)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?;

                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM results WHERE school_id = $1 AND student_id = $2 AND subject ILIKE $3",
                )
                .bind(school_id)
                .bind(ctx.user_id())
                .bind(&subject)
                .fetch_one(db)
                .await?;

                (rows, total)
            }
            Role::Guardian => {
                // Wards' records: students whose guardian is the caller.
                let rows = sqlx::query_as::<_, ResultRecord>(&format!(
                    r#"
                    SELECT r.{} FROM results r
                    JOIN users u ON u.id = r.student_id
                    WHERE r.school_id = $1 AND u.guardian_id = $2 AND r.subject ILIKE $3
                    ORDER BY r.created_at DESC
                    LIMIT $4 OFFSET $5
                    "#,
                    COLUMNS.replace(", ", ", r."),
                ))
                .bind(school_id)
                .bind(ctx.user_id())
                .bind(&subject)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?;

                let total = sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COUNT(*) FROM results r
                    JOIN users u ON u.id = r.student_id
                    WHERE r.school_id = $1 AND u.guardian_id = $2 AND r.subject ILIKE $3
                    "#,
                )
                .bind(school_id)
                .bind(ctx.user_id())
                .bind(&subject)
                .fetch_one(db)
                .await?;

                (rows, total)
            }
            _ => (vec![], 0),
        };

        Ok(PaginatedResultsResponse {
            data: rows,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn update_result(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
        dto: UpdateResultDto,
    ) -> Result<ResultRecord, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Result)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::Update, Some(&resource))?;

        let record = sqlx::query_as::<_, ResultRecord>(&format!(
            r#"
            UPDATE results
            SET score = COALESCE($3, score),
                max_score = COALESCE($4, max_score),
                updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(school_id)
        .bind(dto.score)
        .bind(dto.max_score)
        .fetch_optional(db)
        .await?;

        record.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Result not found")))
    }

    #[instrument(skip(db, ctx))]
    pub async fn delete_result(db: &PgPool, ctx: &TenantContext, id: Uuid) -> Result<(), AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Result)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::Delete, Some(&resource))?;

        let result = sqlx::query("DELETE FROM results WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Result not found")));
        }

        Ok(())
    }
}
