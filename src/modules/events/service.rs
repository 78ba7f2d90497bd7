use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::{
    Action, AppError, PaginationMeta, ResourceContext, ResourceKind, TenantContext,
    assert_permission,
};

use super::model::{CreateEventDto, Event, EventFilterParams, PaginatedEventsResponse, UpdateEventDto};

pub struct EventService;

impl EventService {
    #[instrument(skip(db, ctx))]
    pub async fn create_event(
        db: &PgPool,
        ctx: &TenantContext,
        dto: CreateEventDto,
    ) -> Result<Event, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Event).in_school(school_id);
        assert_permission(ctx, Action::Create, Some(&resource))?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (school_id, title, description, location, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, school_id, title, description, location, starts_at, ends_at,
                      created_at, updated_at
            "#,
        )
        .bind(school_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.location)
        .bind(dto.starts_at)
        .bind(dto.ends_at)
        .fetch_one(db)
        .await?;

        Ok(event)
    }

    #[instrument(skip(db, ctx))]
    pub async fn list_events(
        db: &PgPool,
        ctx: &TenantContext,
        filters: EventFilterParams,
    ) -> Result<PaginatedEventsResponse, AppError> {
        assert_permission(ctx, Action::Read, None)?;

        // No resolved school: empty result, never another tenant's data.
        let Some(school_id) = ctx.school_id() else {
            return Ok(PaginatedEventsResponse {
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

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, school_id, title, description, location, starts_at, ends_at,
                   created_at, updated_at
            FROM events
            WHERE school_id = $1 AND title ILIKE $2
            ORDER BY starts_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(school_id)
        .bind(&search)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM events WHERE school_id = $1 AND title ILIKE $2",
        )
        .bind(school_id)
        .bind(&search)
        .fetch_one(db)
        .await?;

        Ok(PaginatedEventsResponse {
            data: events,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn get_event_by_id(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Event, AppError> {
        assert_permission(ctx, Action::Read, None)?;
        let school_id = ctx
            .school_id()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Event not found")))?;

        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, school_id, title, description, location, starts_at, ends_at,
                   created_at, updated_at
            FROM events
            WHERE id = $1 AND school_id = $2
            "#,
        )
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Event not found")))
    }

    #[instrument(skip(db, ctx))]
    pub async fn update_event(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
        dto: UpdateEventDto,
    ) -> Result<Event, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Event)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::Update, Some(&resource))?;

        // Atomic update-with-predicate: the school filter and the write are
        // one statement, so a concurrent tenant reassignment cannot slip a
        // cross-school write through. Zero rows reads as "not found"
        // whether the row is absent or belongs to another school.
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                starts_at = COALESCE($6, starts_at),
                ends_at = COALESCE($7, ends_at),
                updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING id, school_id, title, description, location, starts_at, ends_at,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(school_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.location)
        .bind(dto.starts_at)
        .bind(dto.ends_at)
        .fetch_optional(db)
        .await?;

        event.ok_or_else(|| {
            tracing::debug!(%id, "event update matched no row in caller's school");
            AppError::not_found(anyhow::anyhow!("Event not found"))
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn delete_event(db: &PgPool, ctx: &TenantContext, id: Uuid) -> Result<(), AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Event)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::Delete, Some(&resource))?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Event not found")));
        }

        Ok(())
    }
}
