//! Notification entities and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use scholaris_core::{NotificationKind, PaginationMeta, PaginationParams};

/// A notification delivered to a single user.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub school_id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub body: Option<String>,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateNotificationDto {
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    #[validate(length(min = 1))]
    pub title: String,
    pub body: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct SendBatchDto {
    #[validate(length(min = 1))]
    pub recipient_ids: Vec<Uuid>,
    pub kind: NotificationKind,
    #[validate(length(min = 1))]
    pub title: String,
    pub body: Option<String>,
}

/// Outcome of a batch send. `skipped` counts recipients that were not in
/// the sender's school or had opted out of the kind.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BatchSendResponse {
    pub sent: u64,
    pub skipped: u64,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct NotificationPreference {
    pub user_id: Uuid,
    pub kind: String,
    pub enabled: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct SetPreferenceDto {
    pub kind: NotificationKind,
    pub enabled: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NotificationFilterParams {
    /// Only return notifications without a `read_at` timestamp
    pub unread_only: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PaginatedNotificationsResponse {
    pub data: Vec<Notification>,
    pub meta: PaginationMeta,
}
