use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use scholaris_core::{
    Action, AppError, PaginationMeta, ResourceContext, ResourceKind, Role, TenantContext,
    assert_permission,
};

use super::model::{
    AttendanceFilterParams, AttendanceRecord, PaginatedAttendanceResponse, RecordAttendanceDto,
    UpdateAttendanceDto,
};

const COLUMNS: &str =
    "id, school_id, student_id, date, present, note, recorded_by, created_at, updated_at";

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(db, ctx))]
    pub async fn record_attendance(
        db: &PgPool,
        ctx: &TenantContext,
        dto: RecordAttendanceDto,
    ) -> Result<AttendanceRecord, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Attendance).in_school(school_id);
        assert_permission(ctx, Action::Create, Some(&resource))?;

        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO attendance (school_id, student_id, date, present, note, recorded_by)
            SELECT $1, u.id, $3, $4, $5, $6
            FROM users u
            WHERE u.id = $2 AND u.school_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(school_id)
        .bind(dto.student_id)
        .bind(dto.date)
        .bind(dto.present)
        .bind(&dto.note)
        .bind(ctx.user_id())
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Attendance already recorded for this student and date"
                ));
            }
            AppError::from(e)
        })?;

        record.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    /// Lists attendance. Staff-level roles see the school; students see
    /// themselves; guardians see their wards.
    #[instrument(skip(db, ctx))]
    pub async fn list_attendance(
        db: &PgPool,
        ctx: &TenantContext,
        filters: AttendanceFilterParams,
    ) -> Result<PaginatedAttendanceResponse, AppError> {
        assert_permission(ctx, Action::Read, None)?;

        let Some(school_id) = ctx.school_id() else {
            return Ok(PaginatedAttendanceResponse {
                data: vec![],
                meta: PaginationMeta::new(0, &filters.pagination),
            });
        };

        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        // A non-staff caller's scope overrides any requested student filter.
        let (student_filter, guardian_filter) = match ctx.role() {
            Role::Developer | Role::Admin | Role::Teacher | Role::Accountant | Role::Staff => {
                (filters.student_id, None)
            }
            Role::Student => (Some(ctx.user_id()), None),
            Role::Guardian => (None, Some(ctx.user_id())),
            Role::User => {
                return Ok(PaginatedAttendanceResponse {
                    data: vec![],
                    meta: PaginationMeta::new(0, &filters.pagination),
                });
            }
        };

        let rows = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            SELECT a.{} FROM attendance a
            JOIN users u ON u.id = a.student_id
            WHERE a.school_id = $1
              AND ($2::uuid IS NULL OR a.student_id = $2)
              AND ($3::uuid IS NULL OR u.guardian_id = $3)
              AND ($4::date IS NULL OR a.date >= $4)
              AND ($5::date IS NULL OR a.date <= $5)
            ORDER BY a.date DESC
            LIMIT $6 OFFSET $7
            "#,
            COLUMNS.replace(", ", ", a."),
        ))
        .bind(school_id)
        .bind(student_filter)
        .bind(guardian_filter)
        .bind(filters.from)
        .bind(filters.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM attendance a
            JOIN users u ON u.id = a.student_id
            WHERE a.school_id = $1
              AND ($2::uuid IS NULL OR a.student_id = $2)
              AND ($3::uuid IS NULL OR u.guardian_id = $3)
              AND ($4::date IS NULL OR a.date >= $4)
              AND ($5::date IS NULL OR a.date <= $5)
            "#,
        )
        .bind(school_id)
        .bind(student_filter)
        .bind(guardian_filter)
        .bind(filters.from)
        .bind(filters.to)
        .fetch_one(db)
        .await?;

        Ok(PaginatedAttendanceResponse {
            data: rows,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db, ctx))]
    pub async fn update_attendance(
        db: &PgPool,
        ctx: &TenantContext,
        id: Uuid,
        dto: UpdateAttendanceDto,
    ) -> Result<AttendanceRecord, AppError> {
        let school_id = ctx.require_school()?;
        let resource = ResourceContext::of_kind(ResourceKind::Attendance)
            .in_school(school_id)
            .with_id(id);
        assert_permission(ctx, Action::Update, Some(&resource))?;

        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            UPDATE attendance
            SET present = COALESCE($3, present),
                note = COALESCE($4, note),
                updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(school_id)
        .bind(dto.present)
        .bind(&dto.note)
        .fetch_optional(db)
        .await?;

        record.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Attendance record not found")))
    }
}
