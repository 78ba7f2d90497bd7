//! # Scholaris DB
//!
//! PostgreSQL connection pool initialization for the Scholaris API.
//!
//! The pool is created once at startup from `DATABASE_URL`, then cloned
//! into the application state for use in request handlers.

use std::env;

/// Initializes the PostgreSQL connection pool from `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails. Called once
/// during startup, before the server begins accepting requests.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
