//! Grade/result entities and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use scholaris_core::{PaginationMeta, PaginationParams};

/// A recorded grade for one student in one subject/term.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ResultRecord {
    pub id: Uuid,
    pub school_id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub term: String,
    pub score: i32,
    pub max_score: i32,
    pub graded_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateResultDto {
    pub student_id: Uuid,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub term: String,
    #[validate(range(min = 0))]
    pub score: i32,
    #[validate(range(min = 1))]
    pub max_score: i32,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateResultDto {
    #[validate(range(min = 0))]
    pub score: Option<i32>,
    #[validate(range(min = 1))]
    pub max_score: Option<i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResultFilterParams {
    /// Restrict to one student (staff-level roles only; other roles are
    /// always restricted to themselves)
    #[serde(default, deserialize_with = "scholaris_core::serde::deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    pub subject: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PaginatedResultsResponse {
    pub data: Vec<ResultRecord>,
    pub meta: PaginationMeta,
}
