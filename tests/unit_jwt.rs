use scholaris::scholaris_auth::{create_access_token, verify_token};
use scholaris::scholaris_config::JwtConfig;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_access_token(
        user_id,
        "test@example.com",
        "student",
        Some(Uuid::new_v4()),
        "en",
        &jwt_config,
    );

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    for role in [
        "developer",
        "admin",
        "teacher",
        "accountant",
        "staff",
        "student",
        "guardian",
        "user",
    ] {
        let result = create_access_token(
            user_id,
            "test@example.com",
            role,
            Some(Uuid::new_v4()),
            "en",
            &jwt_config,
        );
        assert!(result.is_ok(), "{role}");
    }
}

#[test]
fn test_verify_token_round_trip() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();

    let token = create_access_token(
        user_id,
        "teacher@school.test",
        "teacher",
        Some(school_id),
        "fr",
        &jwt_config,
    )
    .unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "teacher@school.test");
    assert_eq!(claims.role, "teacher");
    assert_eq!(claims.school_id, Some(school_id));
    assert_eq!(claims.locale, "fr");
}

#[test]
fn test_developer_token_has_no_school() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(
        Uuid::new_v4(),
        "dev@example.com",
        "developer",
        None,
        "en",
        &jwt_config,
    )
    .unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.school_id, None);
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        Uuid::new_v4(),
        "test@example.com",
        "student",
        None,
        "en",
        &jwt_config,
    )
    .unwrap();

    let other = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_expiry: 3600,
    };

    let result = verify_token(&token, &other);
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().status,
        axum::http::StatusCode::UNAUTHORIZED
    );
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();

    for garbage in ["", "not-a-jwt", "a.b.c", "Bearer xyz"] {
        assert!(verify_token(garbage, &jwt_config).is_err(), "{garbage:?}");
    }
}
