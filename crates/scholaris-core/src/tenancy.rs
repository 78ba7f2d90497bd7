//! Per-request tenant context.
//!
//! Every server-side operation in Scholaris is scoped to one school. The
//! [`TenantContext`] carries that scope, resolved once per request from the
//! verified session claims and passed explicitly into every service call —
//! there is no ambient "current tenant" state anywhere in the codebase.
//!
//! The context is immutable and request-scoped: it is built fresh for each
//! inbound request by the `middleware::tenant` extractor in the application
//! crate and discarded when the request completes. It is never cached, since
//! a user's school assignment or role can change between requests.
//!
//! # Fail-closed policy
//!
//! A user without a school association (`school_id == None`) cannot touch
//! tenant-scoped data:
//!
//! - writes call [`TenantContext::require_school`] and get a hard `403`
//! - list reads return an empty result set (the services short-circuit
//!   before querying)
//!
//! Both outcomes are deny-by-default; no call path silently queries without
//! a school filter.

use uuid::Uuid;

use crate::errors::AppError;
use crate::permissions::Role;

/// Immutable request-scoped tenant context.
///
/// `school_id` is the isolation key. `None` means no tenant was resolved
/// for this session (e.g. a developer account, or a user that was never
/// assigned to a school) and blocks all tenant-scoped operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    user_id: Uuid,
    school_id: Option<Uuid>,
    role: Role,
    locale: String,
}

impl TenantContext {
    pub fn new(
        user_id: Uuid,
        school_id: Option<Uuid>,
        role: Role,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            school_id,
            role,
            locale: locale.into(),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn school_id(&self) -> Option<Uuid> {
        self.school_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Display-language hint from the session. Irrelevant to authorization.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the school id, or a `403` when the session has no school
    /// association. Every tenant-scoped mutation goes through this.
    pub fn require_school(&self) -> Result<Uuid, AppError> {
        self.school_id.ok_or_else(|| {
            AppError::forbidden("User is not associated with a school".to_string())
        })
    }

    /// Whether this context belongs to the unscoped top-level role.
    pub fn is_developer(&self) -> bool {
        self.role == Role::Developer
    }

    /// Whether the given resource school matches this context's school.
    ///
    /// Fails closed: `false` whenever either side is unknown, so callers
    /// cannot accidentally treat "unverifiable" as a match.
    pub fn same_school(&self, resource_school_id: Option<Uuid>) -> bool {
        match (self.school_id, resource_school_id) {
            (Some(own), Some(other)) => own == other,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_school_present() {
        let school = Uuid::new_v4();
        let ctx = TenantContext::new(Uuid::new_v4(), Some(school), Role::Admin, "en");
        assert_eq!(ctx.require_school().unwrap(), school);
    }

    #[test]
    fn test_require_school_missing_is_forbidden() {
        let ctx = TenantContext::new(Uuid::new_v4(), None, Role::Admin, "en");
        let err = ctx.require_school().unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_same_school_fails_closed() {
        let school = Uuid::new_v4();
        let ctx = TenantContext::new(Uuid::new_v4(), Some(school), Role::Teacher, "en");

        assert!(ctx.same_school(Some(school)));
        assert!(!ctx.same_school(Some(Uuid::new_v4())));
        assert!(!ctx.same_school(None));

        let unscoped = TenantContext::new(Uuid::new_v4(), None, Role::Teacher, "en");
        assert!(!unscoped.same_school(Some(school)));
    }
}
