//! # Scholaris Core
//!
//! Core types for the Scholaris API.
//!
//! This crate provides the foundational pieces shared across the application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`tenancy`]: The per-request [`TenantContext`] that scopes every
//!   read and write to one school
//! - [`permissions`]: The static role/action rule table and the
//!   [`check_permission`]/[`assert_permission`] decision functions
//! - [`pagination`]: Pagination utilities for API responses
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use scholaris_core::{TenantContext, Role, Action, assert_permission};
//!
//! let ctx = TenantContext::new(user_id, Some(school_id), Role::Teacher, "en");
//! assert_permission(&ctx, Action::Create, Some(&resource))?;
//! ```

pub mod errors;
pub mod pagination;
pub mod permissions;
pub mod serde;
pub mod tenancy;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use permissions::{
    Action, NotificationKind, ResourceContext, ResourceKind, Role, assert_permission,
    check_permission,
};
pub use tenancy::TenantContext;
