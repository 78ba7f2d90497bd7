//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Access-token claims.
///
/// These are the session facts the tenant context resolver reads on every
/// request. The `role` is one of the closed role strings (`"admin"`,
/// `"teacher"`, ...); anything else resolves to the least-privileged role.
/// `school_id` is `None` for developer accounts and for users that were
/// never assigned to a school.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role claim string
    pub role: String,
    /// School scope; `None` blocks all tenant-scoped operations
    pub school_id: Option<Uuid>,
    /// Display-language hint
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

fn default_locale() -> String {
    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            email: "test@example.com".to_string(),
            role: "teacher".to_string(),
            school_id: None,
            locale: "en".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""role":"teacher""#));
    }

    #[test]
    fn test_claims_deserialize_defaults_locale() {
        let json = r#"{"sub":"u","email":"u@test.com","role":"student","school_id":null,"exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.locale, "en");
        assert_eq!(claims.school_id, None);
    }

    #[test]
    fn test_claims_with_school_id() {
        let school_id = Uuid::new_v4();
        let claims = Claims {
            sub: "user-123".to_string(),
            email: "user@school.com".to_string(),
            role: "admin".to_string(),
            school_id: Some(school_id),
            locale: "fr".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        assert_eq!(claims.school_id, Some(school_id));
        assert_eq!(claims.locale, "fr");
    }
}
