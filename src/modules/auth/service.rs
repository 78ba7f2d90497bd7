use sqlx::PgPool;
use tracing::instrument;

use scholaris_auth::create_access_token;
use scholaris_config::JwtConfig;
use scholaris_core::AppError;

use crate::utils::password::verify_password;

use super::model::{AuthUserRow, LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Authenticates credentials and issues an access token.
    ///
    /// Unknown email and wrong password produce the same `401` so the
    /// endpoint does not leak which accounts exist.
    #[instrument(skip(db, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, AuthUserRow>(
            r#"
            SELECT id, school_id, email, password, role, locale
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&dto.password, &user.password)? {
            tracing::debug!("password mismatch");
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let access_token = create_access_token(
            user.id,
            &user.email,
            &user.role,
            user.school_id,
            &user.locale,
            jwt_config,
        )?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
        })
    }
}
