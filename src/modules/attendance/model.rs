//! Attendance entities and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use scholaris_core::{PaginationMeta, PaginationParams};

/// One attendance mark: a student on a date, present or absent.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub school_id: Uuid,
    pub student_id: Uuid,
    pub date: chrono::NaiveDate,
    pub present: bool,
    pub note: Option<String>,
    pub recorded_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RecordAttendanceDto {
    pub student_id: Uuid,
    pub date: chrono::NaiveDate,
    pub present: bool,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateAttendanceDto {
    pub present: Option<bool>,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AttendanceFilterParams {
    #[serde(default, deserialize_with = "scholaris_core::serde::deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PaginatedAttendanceResponse {
    pub data: Vec<AttendanceRecord>,
    pub meta: PaginationMeta,
}
