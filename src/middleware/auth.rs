use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use scholaris_auth::{Claims, verify_token};
use scholaris_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and exposes the raw session
/// claims. Most handlers should extract the `TenantContext` resolver
/// instead; this is the lower layer it builds on.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The user ID from the subject claim.
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn school_id(&self) -> Option<uuid::Uuid> {
        self.0.school_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims_with_sub(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            role: "teacher".to_string(),
            school_id: None,
            locale: "en".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id_parses_valid_uuid() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser(claims_with_sub(&id.to_string()));
        assert_eq!(auth_user.user_id().unwrap(), id);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        let auth_user = AuthUser(claims_with_sub("not-a-uuid"));
        assert!(auth_user.user_id().is_err());
    }
}
