use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use scholaris_core::{PaginationMeta, PaginationParams, Role};

/// A user account, as exposed over the API. The password hash never
/// leaves the database layer.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub school_id: Option<Uuid>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub locale: String,
    pub guardian_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct AssignRoleDto {
    pub role: Role,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AccountFilterParams {
    /// Case-insensitive name or email search
    pub search: Option<String>,
    /// Restrict to one role
    pub role: Option<Role>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PaginatedAccountsResponse {
    pub data: Vec<Account>,
    pub meta: PaginationMeta,
}
