use sqlx::PgPool;
use tracing::instrument;

use scholaris_core::{
    Action, AppError, ResourceContext, ResourceKind, TenantContext, assert_permission,
};

use super::model::{SchoolSettings, UpsertSettingsDto};

pub struct SettingsService;

impl SettingsService {
    #[instrument(skip(db, ctx))]
    pub async fn get_settings(
        db: &PgPool,
        ctx: &TenantContext,
    ) -> Result<SchoolSettings, AppError> {
        assert_permission(ctx, Action::Read, None)?;
        let school_id = ctx
            .school_id()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Settings not found")))?;

        sqlx::query_as::<_, SchoolSettings>(
            r#"
            SELECT school_id, academic_year, timezone, default_locale, updated_at
            FROM school_settings
            WHERE school_id = $1
            "#,
        )
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Settings not found")))
    }

    /// Creates or updates the caller's school settings in one statement.
    /// Absent fields keep their current (or default) value.
    #[instrument(skip(db, ctx))]
    pub async fn upsert_settings(
        db: &PgPool,
        ctx: &TenantContext,
        dto: UpsertSettingsDto,
    ) -> Result<SchoolSettings, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Settings).in_school(school_id);
        assert_permission(ctx, Action::Update, Some(&resource))?;

        let settings = sqlx::query_as::<_, SchoolSettings>(
            r#"
            INSERT INTO school_settings (school_id, academic_year, timezone, default_locale)
            VALUES ($1, $2, COALESCE($3, 'UTC'), COALESCE($4, 'en'))
            ON CONFLICT (school_id)
            DO UPDATE SET
                academic_year = COALESCE($2, school_settings.academic_year),
                timezone = COALESCE($3, school_settings.timezone),
                default_locale = COALESCE($4, school_settings.default_locale),
                updated_at = NOW()
            RETURNING school_id, academic_year, timezone, default_locale, updated_at
            "#,
        )
        .bind(school_id)
        .bind(&dto.academic_year)
        .bind(&dto.timezone)
        .bind(&dto.default_locale)
        .fetch_one(db)
        .await?;

        Ok(settings)
    }
}
