//! Feature modules.
//!
//! Each module follows the same structure:
//!
//! - `model.rs`: Database entities and request/response DTOs
//! - `service.rs`: Business logic; takes the database pool and the
//!   request's `TenantContext` explicitly
//! - `controller.rs`: HTTP handlers
//! - `router.rs`: Axum router configuration
//!
//! Every service threads the tenant's `school_id` into each query predicate
//! and calls `assert_permission` before privileged work.

pub mod accounts;
pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod events;
pub mod exams;
pub mod notifications;
pub mod results;
pub mod settings;
