//! The tenant context resolver.
//!
//! Turns the verified session claims into the immutable [`TenantContext`]
//! that every service call takes as an explicit argument. Resolution runs
//! fresh on every request — the context is never cached, since a user's
//! role or school assignment can change between requests.
//!
//! Resolution never fails for "no school": a session without a school
//! association yields `school_id = None`, and the fail-closed policies in
//! the services take it from there. An unknown role claim resolves to the
//! least-privileged [`Role::User`].

use axum::{extract::FromRequestParts, http::request::Parts};

use scholaris_core::{AppError, Role, TenantContext};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Extractor wrapper so handlers can take the context directly:
///
/// ```ignore
/// async fn handler(Tenant(ctx): Tenant, ...) -> Result<..., AppError> {
///     EventService::list_events(&db, &ctx, params).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantContext);

/// Builds a [`TenantContext`] from verified claims.
pub fn resolve_tenant(auth_user: &AuthUser) -> Result<TenantContext, AppError> {
    let user_id = auth_user.user_id()?;
    let role = Role::parse(&auth_user.0.role).unwrap_or(Role::User);

    Ok(TenantContext::new(
        user_id,
        auth_user.0.school_id,
        role,
        auth_user.0.locale.clone(),
    ))
}

impl FromRequestParts<AppState> for Tenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        Ok(Tenant(resolve_tenant(&auth_user)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholaris_auth::Claims;
    use uuid::Uuid;

    fn auth_user(role: &str, school_id: Option<Uuid>) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            school_id,
            locale: "en".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_resolves_role_and_school() {
        let school = Uuid::new_v4();
        let ctx = resolve_tenant(&auth_user("accountant", Some(school))).unwrap();
        assert_eq!(ctx.role(), Role::Accountant);
        assert_eq!(ctx.school_id(), Some(school));
    }

    #[test]
    fn test_unknown_role_defaults_to_least_privileged() {
        let ctx = resolve_tenant(&auth_user("superuser", None)).unwrap();
        assert_eq!(ctx.role(), Role::User);
        assert_eq!(ctx.school_id(), None);
    }

    #[test]
    fn test_invalid_subject_rejected() {
        let mut user = auth_user("admin", None);
        user.0.sub = "garbage".to_string();
        assert!(resolve_tenant(&user).is_err());
    }
}
