//! Bootstrap commands that run outside the HTTP server.

use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Creates the unscoped `developer` account. Developers cannot be created
/// over the API, only here.
pub async fn create_developer(
    db: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        r#"
        INSERT INTO users (first_name, last_name, email, password, role, school_id)
        VALUES ($1, $2, $3, $4, 'developer', NULL)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
