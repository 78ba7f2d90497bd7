use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::{
    Action, AppError, PaginationMeta, ResourceContext, ResourceKind, TenantContext,
    assert_permission,
};

use super::model::{
    CreateExamTemplateDto, ExamTemplate, ExamTemplateFilterParams,
    PaginatedExamTemplatesResponse, UpdateExamTemplateDto,
};

const COLUMNS: &str =
    "id, school_id, name, subject, questions, created_by, created_at, updated_at";

/// Template management is a distinct privilege from ordinary CRUD: all
/// mutations here run under `Action::ManageTemplates` (admin-level).
pub struct ExamTemplateService;

impl ExamTemplateService {
    #[instrument(skip(db, ctx, dto))]
    pub async fn create_template(
        db: &PgPool,
        ctx: &TenantContext,
        dto: CreateExamTemplateDto,
    ) -> Result<ExamTemplate, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::ExamTemplate).in_school(school_id);
        assert_permission(ctx, Action::ManageTemplates, Some(&resource))?;

        let template = sqlx::query_as::<_, ExamTemplate>(&format!(
            r#"
            INSERT INTO exam_templates (school_id, name, subject, questions, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(school_id)
        .bind(&dto.name)
        .bind(&dto.subject)
        .bind(&dto.questions)
        .bind(ctx.user_id())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "An exam template with this name already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(template)
    }

    #[instrument(skip(db, ctx))]
    pub async fn list_templates(
        db: &PgPool,
        ctx: &TenantContext,
        filters: ExamTemplateFilterParams,
    ) -> Result<PaginatedExamTemplatesResponse, AppError> {
        assert_permission(ctx, Action::Read, None)?;

        let Some(school_id) = ctx.school_id() else {
            return Ok(PaginatedExamTemplatesResponse {
                data: vec![],
                meta: PaginationMeta::new(0, &filters.pagination),
            });
        };

        let subject = filters
            .subject
            .as_deref()
            .map(|s| format!("%{}%", s))
            .unwrap_or_else(|| "%".to_string());

        let templates = sqlx::query_as::<_, ExamTemplate>(&format!(
            r#"
            SELECT {COLUMNS} FROM exam_templates
            WHERE school_id = $1 AND subject ILIKE $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(school_id)
        .bind(&subject)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.offset())
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM exam_templates WHERE school_id = $1 AND subject ILIKE $2",
        )
        .bind(school_id)
        .bind(&subject)
        .fetch_one(db)
        .await?;

        Ok(PaginatedExamTemplatesResponse {
            data: templates,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn get_template_by_id(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<ExamTemplate, AppError> {
        assert_permission(ctx, Action::Read, None)?;
        let school_id = ctx
            .school_id()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam template not found")))?;

        sqlx::query_as::<_, ExamTemplate>(&format!(
            "SELECT {COLUMNS} FROM exam_templates WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam template not found")))
    }

    #[instrument(skip(db, ctx, dto))]
    pub async fn update_template(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
        dto: UpdateExamTemplateDto,
    ) -> Result<ExamTemplate, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::ExamTemplate)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::ManageTemplates, Some(&resource))?;

        let template = sqlx::query_as::<_, ExamTemplate>(&format!(
            r#"
            UPDATE exam_templates
            SET name = COALESCE($3, name),
                subject = COALESCE($4, subject),
                questions = COALESCE($5, questions),
                updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(school_id)
        .bind(&dto.name)
        .bind(&dto.subject)
        .bind(&dto.questions)
        .fetch_optional(db)
        .await?;

        template.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam template not found")))
    }

    #[instrument(skip(db, ctx))]
    pub async fn delete_template(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<(), AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::ExamTemplate)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::ManageTemplates, Some(&resource))?;

        let result = sqlx::query("DELETE FROM exam_templates WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Exam template not found")));
        }

        Ok(())
    }
}
