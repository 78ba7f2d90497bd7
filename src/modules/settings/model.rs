use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Per-school configuration. One row per school, upserted as a whole.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct SchoolSettings {
    pub school_id: Uuid,
    pub academic_year: Option<String>,
    pub timezone: String,
    pub default_locale: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpsertSettingsDto {
    pub academic_year: Option<String>,
    #[validate(length(min = 1))]
    pub timezone: Option<String>,
    #[validate(length(min = 2, max = 8))]
    pub default_locale: Option<String>,
}
