//! Access-token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use scholaris_config::JwtConfig;
use scholaris_core::AppError;

use crate::claims::Claims;

/// Creates an access token carrying the session facts the tenant resolver
/// needs: user id, role, school scope, and locale.
///
/// # Errors
///
/// Returns an error if token encoding fails (e.g. invalid secret key).
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: &str,
    school_id: Option<Uuid>,
    locale: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        school_id,
        locale: locale.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {e}")))
}

/// Verifies an access token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns `401` for an invalid, expired, or malformed token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let school_id = Uuid::new_v4();

        let token = create_access_token(
            user_id,
            "teacher@school.test",
            "teacher",
            Some(school_id),
            "en",
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.school_id, Some(school_id));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let token =
            create_access_token(Uuid::new_v4(), "a@b.c", "student", None, "en", &config).unwrap();

        let other = JwtConfig {
            secret: "different-secret".to_string(),
            access_token_expiry: 3600,
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = test_config();
        assert!(verify_token("not-a-jwt", &config).is_err());
    }
}
