use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Internal row used during login; carries the password hash and never
/// crosses the API boundary.
#[derive(FromRow, Debug, Clone)]
pub struct AuthUserRow {
    pub id: Uuid,
    pub school_id: Option<Uuid>,
    pub email: String,
    pub password: String,
    pub role: String,
    pub locale: String,
}
