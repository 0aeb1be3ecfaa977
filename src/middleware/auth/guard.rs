//! Pure access checks over the identity context.
//!
//! No I/O and no logging here; the middleware in `access` / `role` decides
//! how a failure is reported.
use crate::api::extractors::IdentityCtx;
use crate::repos::user_repo::Role;

use super::AccessError;

pub fn check_subject(ctx: Option<&IdentityCtx>) -> Result<&IdentityCtx, AccessError> {
    ctx.ok_or(AccessError::Unauthenticated)
}

/// Requires a resolved, enabled account.
pub fn check_active(ctx: &IdentityCtx) -> Result<(), AccessError> {
    match ctx.account_enabled() {
        Some(true) => Ok(()),
        Some(false) => Err(AccessError::AccountDisabled),
        None => Err(AccessError::MissingRoleContext),
    }
}

/// Requires the resolved role to equal `required`.
///
/// An empty role slot is a wiring defect and never reads as a permission failure.
pub fn check_role(ctx: &IdentityCtx, required: Role) -> Result<(), AccessError> {
    match ctx.role() {
        Some(actual) if actual == required => Ok(()),
        Some(actual) => Err(AccessError::InsufficientPermissions { required, actual }),
        None => Err(AccessError::MissingRoleContext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::{ResolvedRole, SubjectId};

    fn authenticated() -> IdentityCtx {
        IdentityCtx::authenticated(SubjectId::new("u1").unwrap())
    }

    fn resolved(role: Role, enabled: bool) -> IdentityCtx {
        authenticated()
            .with_role(ResolvedRole {
                role,
                enabled,
                email: "u1@example.com".into(),
            })
            .unwrap()
    }

    #[test]
    fn absent_subject_is_unauthenticated() {
        assert_eq!(check_subject(None).unwrap_err(), AccessError::Unauthenticated);
        assert!(check_subject(Some(&authenticated())).is_ok());
    }

    #[test]
    fn unresolved_role_is_missing_context_not_forbidden() {
        assert_eq!(
            check_role(&authenticated(), Role::Admin),
            Err(AccessError::MissingRoleContext)
        );
        assert_eq!(
            check_active(&authenticated()),
            Err(AccessError::MissingRoleContext)
        );
    }

    #[test]
    fn role_must_match_exactly() {
        assert!(check_role(&resolved(Role::Admin, true), Role::Admin).is_ok());
        assert_eq!(
            check_role(&resolved(Role::Client, true), Role::Admin),
            Err(AccessError::InsufficientPermissions {
                required: Role::Admin,
                actual: Role::Client,
            })
        );
        assert!(check_role(&resolved(Role::Admin, true), Role::Sales).is_err());
    }

    #[test]
    fn disabled_account_fails_active_check() {
        assert!(check_active(&resolved(Role::Admin, true)).is_ok());
        assert_eq!(
            check_active(&resolved(Role::Admin, false)),
            Err(AccessError::AccountDisabled)
        );
    }
}
