use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::{
    Action, AppError, PaginationMeta, ResourceContext, ResourceKind, TenantContext,
    assert_permission,
};

use super::model::{
    BatchSendResponse, CreateNotificationDto, Notification, NotificationFilterParams,
    NotificationPreference, PaginatedNotificationsResponse, SendBatchDto, SetPreferenceDto,
};

const COLUMNS: &str = "id, school_id, user_id, kind, title, body, read_at, created_at";

pub struct NotificationService;

impl NotificationService {
    /// Lists the caller's own notifications, newest first.
    #[instrument(skip(db, ctx))]
    pub async fn list_notifications(
        db: &PgPool,
        ctx: &TenantContext,
        filters: NotificationFilterParams,
    ) -> Result<PaginatedNotificationsResponse, AppError> {
        assert_permission(ctx, Action::Read, None)?;

        let unread_only = filters.unread_only.unwrap_or(false);
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let notifications = sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR read_at IS NULL)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(ctx.user_id())
        .bind(unread_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR read_at IS NULL)
            "#,
        )
        .bind(ctx.user_id())
        .bind(unread_only)
        .fetch_one(db)
        .await?;

        Ok(PaginatedNotificationsResponse {
            data: notifications,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    /// Marks one of the caller's notifications as read. Idempotent: a
    /// second call leaves the original timestamp in place.
    #[instrument(skip(db, ctx))]
    pub async fn mark_read(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Notification, AppError> {
        let resource = ResourceContext {
            id: Some(id),
            user_id: Some(ctx.user_id()),
            school_id: ctx.school_id(),
            ..ResourceContext::default()
        };
        assert_permission(ctx, Action::MarkRead, Some(&resource))?;

        // The ownership predicate rides along with the write: someone
        // else's notification reads as "not found".
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET read_at = COALESCE(read_at, NOW())
            WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(ctx.user_id())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notification not found")))
    }

    /// Sends a single notification to one recipient in the caller's school.
    #[instrument(skip(db, ctx))]
    pub async fn create_notification(
        db: &PgPool,
        ctx: &TenantContext,
        dto: CreateNotificationDto,
    ) -> Result<Notification, AppError> {
        let school_id = ctx.require_school()?;
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(dto.kind)).in_school(school_id);
        assert_permission(ctx, Action::Create, Some(&resource))?;

        // INSERT .. SELECT pins the recipient to the sender's school in the
        // same statement; a recipient from another school yields zero rows.
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (school_id, user_id, kind, title, body)
            SELECT u.school_id, u.id, $3, $4, $5
            FROM users u
            WHERE u.id = $1 AND u.school_id = $2
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(dto.recipient_id)
        .bind(school_id)
        .bind(dto.kind.as_str())
        .bind(&dto.title)
        .bind(&dto.body)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Recipient not found")))
    }

    /// Fans one notification out to many recipients in a single statement.
    ///
    /// Recipients outside the sender's school, unknown ids, and users who
    /// opted out of the kind are silently skipped and reported in the count.
    #[instrument(skip(db, ctx), fields(recipients = dto.recipient_ids.len()))]
    pub async fn send_batch(
        db: &PgPool,
        ctx: &TenantContext,
        dto: SendBatchDto,
    ) -> Result<BatchSendResponse, AppError> {
        let school_id = ctx.require_school()?;
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(dto.kind)).in_school(school_id);
        assert_permission(ctx, Action::SendBatch, Some(&resource))?;

        let requested = dto.recipient_ids.len() as u64;

        let result = sqlx::query(
            r#"
            INSERT INTO notifications (school_id, user_id, kind, title, body)
            SELECT u.school_id, u.id, $3, $4, $5
            FROM users u
            WHERE u.id = ANY($1) AND u.school_id = $2
              AND NOT EXISTS (
                  SELECT 1 FROM notification_preferences p
                  WHERE p.user_id = u.id AND p.kind = $3 AND NOT p.enabled
              )
            "#,
        )
        .bind(&dto.recipient_ids)
        .bind(school_id)
        .bind(dto.kind.as_str())
        .bind(&dto.title)
        .bind(&dto.body)
        .execute(db)
        .await?;

        let sent = result.rows_affected();
        tracing::info!(sent, requested, kind = dto.kind.as_str(), "batch sent");

        Ok(BatchSendResponse {
            sent,
            skipped: requested.saturating_sub(sent),
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn list_preferences(
        db: &PgPool,
        ctx: &TenantContext,
    ) -> Result<Vec<NotificationPreference>, AppError> {
        let resource = ResourceContext {
            user_id: Some(ctx.user_id()),
            ..ResourceContext::default()
        };
        assert_permission(ctx, Action::ManagePreferences, Some(&resource))?;

        let preferences = sqlx::query_as::<_, NotificationPreference>(
            r#"
            SELECT user_id, kind, enabled, updated_at
            FROM notification_preferences
            WHERE user_id = $1
            ORDER BY kind
            "#,
        )
        .bind(ctx.user_id())
        .fetch_all(db)
        .await?;

        Ok(preferences)
    }

    /// Upserts the caller's preference for one notification kind.
    #[instrument(skip(db, ctx))]
    pub async fn set_preference(
        db: &PgPool,
        ctx: &TenantContext,
        dto: SetPreferenceDto,
    ) -> Result<NotificationPreference, AppError> {
        let resource = ResourceContext {
            user_id: Some(ctx.user_id()),
            kind: Some(ResourceKind::Notification(dto.kind)),
            ..ResourceContext::default()
        };
        assert_permission(ctx, Action::ManagePreferences, Some(&resource))?;

        let preference = sqlx::query_as::<_, NotificationPreference>(
            r#"
            INSERT INTO notification_preferences (user_id, kind, enabled)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, kind)
            DO UPDATE SET enabled = $3, updated_at = NOW()
            RETURNING user_id, kind, enabled, updated_at
            "#,
        )
        .bind(ctx.user_id())
        .bind(dto.kind.as_str())
        .bind(dto.enabled)
        .fetch_one(db)
        .await?;

        Ok(preference)
    }
}
