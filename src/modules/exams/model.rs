//! Exam template (question bank) entities and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use scholaris_core::{PaginationMeta, PaginationParams};

/// A reusable exam template: name, subject, and its question bank stored
/// as a JSON document.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct ExamTemplate {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub subject: String,
    /// Question bank payload; structure is owned by the exam builder UI
    #[schema(value_type = Object)]
    pub questions: serde_json::Value,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateExamTemplateDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[schema(value_type = Object)]
    pub questions: serde_json::Value,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateExamTemplateDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub subject: Option<String>,
    #[schema(value_type = Object)]
    pub questions: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExamTemplateFilterParams {
    pub subject: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PaginatedExamTemplatesResponse {
    pub data: Vec<ExamTemplate>,
    pub meta: PaginationMeta,
}
