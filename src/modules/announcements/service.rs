use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::{
    Action, AppError, PaginationMeta, ResourceContext, ResourceKind, Role, TenantContext,
    assert_permission,
};

use super::model::{
    Announcement, AnnouncementFilterParams, CreateAnnouncementDto,
    PaginatedAnnouncementsResponse, UpdateAnnouncementDto,
};

const COLUMNS: &str = "id, school_id, title, body, target_role, created_at, updated_at";

pub struct AnnouncementService;

impl AnnouncementService {
    #[instrument(skip(db, ctx))]
    pub async fn create_announcement(
        db: &PgPool,
        ctx: &TenantContext,
        dto: CreateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext {
            target_role: dto.target_role,
            ..ResourceContext::of_kind(ResourceKind::Announcement).in_school(school_id)
        };
        assert_permission(ctx, Action::Create, Some(&resource))?;

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            INSERT INTO announcements (school_id, title, body, target_role)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(school_id)
        .bind(&dto.title)
        .bind(&dto.body)
        .bind(dto.target_role.map(|r| r.as_str()))
        .fetch_one(db)
        .await?;

        Ok(announcement)
    }

    /// Lists announcements visible to the caller. Staff-level roles see the
    /// whole school feed; everyone else sees untargeted announcements plus
    /// those targeting their own role.
    #[instrument(skip(db, ctx))]
    pub async fn list_announcements(
        db: &PgPool,
        ctx: &TenantContext,
        filters: AnnouncementFilterParams,
    ) -> Result<PaginatedAnnouncementsResponse, AppError> {
        assert_permission(ctx, Action::Read, None)?;

        let Some(school_id) = ctx.school_id() else {
            return Ok(PaginatedAnnouncementsResponse {
                data: vec![],
                meta: PaginationMeta::new(0, &filters.pagination),
            });
        };

        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let sees_everything = matches!(
            ctx.role(),
            Role::Developer | Role::Admin | Role::Teacher | Role::Accountant | Role::Staff
        );

        let (announcements, total) = if sees_everything {
            let rows = sqlx::query_as::<_, Announcement>(&format!(
                r#"
                SELECT {COLUMNS} FROM announcements
                WHERE school_id = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            ))
            .bind(school_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?;

            let total = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM announcements WHERE school_id = $1",
            )
            .bind(school_id)
            .fetch_one(db)
            .await?;

            (rows, total)
        } else {
            let role = ctx.role().as_str();
            let rows = sqlx::query_as::<_, Announcement>(&format!(
                r#"
                SELECT {COLUMNS} FROM announcements
                WHERE school_id = $1 AND (target_role IS NULL OR target_role = $2)
                ORDER BY created_at DESC
                LIMIT $3 OFFSET $4
                "#
            ))
            .bind(school_id)
            .bind(role)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?;

            let total = sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*) FROM announcements
                WHERE school_id = $1 AND (target_role IS NULL OR target_role = $2)
                "#,
            )
            .bind(school_id)
            .bind(role)
            .fetch_one(db)
            .await?;

            (rows, total)
        };

        Ok(PaginatedAnnouncementsResponse {
            data: announcements,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn update_announcement(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
        dto: UpdateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Announcement)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::Update, Some(&resource))?;

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            UPDATE announcements
            SET title = COALESCE($3, title),
                body = COALESCE($4, body),
                target_role = COALESCE($5, target_role),
                updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(school_id)
        .bind(&dto.title)
        .bind(&dto.body)
        .bind(dto.target_role.map(|r| r.as_str()))
        .fetch_optional(db)
        .await?;

        announcement.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Announcement not found")))
    }

    #[instrument(skip(db, ctx))]
    pub async fn delete_announcement(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<(), AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Announcement)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::Delete, Some(&resource))?;

        let result = sqlx::query("DELETE FROM announcements WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Announcement not found")));
        }

        Ok(())
    }
}
