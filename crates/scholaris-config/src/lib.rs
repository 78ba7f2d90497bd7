//! # Scholaris Config
//!
//! Configuration types for the Scholaris API, loaded from environment
//! variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS configuration
//!
//! # Example
//!
//! ```ignore
//! use scholaris_config::{JwtConfig, CorsConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
