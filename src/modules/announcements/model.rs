//! Announcement entities and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use scholaris_core::{PaginationMeta, PaginationParams, Role};

/// A school-wide or role-targeted announcement.
///
/// `target_role` narrows the audience: `None` means everyone in the school
/// sees it, otherwise only sessions with that role (plus staff-level roles,
/// which always see the full list).
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Announcement {
    pub id: Uuid,
    pub school_id: Uuid,
    pub title: String,
    pub body: String,
    pub target_role: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateAnnouncementDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub target_role: Option<Role>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateAnnouncementDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
    pub target_role: Option<Role>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnnouncementFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PaginatedAnnouncementsResponse {
    pub data: Vec<Announcement>,
    pub meta: PaginationMeta,
}
