//! # Scholaris Auth
//!
//! Session claims and JWT utilities for the Scholaris API.
//!
//! This crate provides:
//!
//! - [`claims`]: The access-token claim structure consumed by the tenant
//!   resolver
//! - [`jwt`]: Token creation and verification
//!
//! Access tokens carry everything the tenant context resolver needs —
//! user id, role string, school scope, and locale — so authorization never
//! requires a database round trip.
//!
//! # Example
//!
//! ```ignore
//! use scholaris_auth::{create_access_token, verify_token};
//! use scholaris_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "user@example.com", "teacher",
//!     Some(school_id), "en", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
