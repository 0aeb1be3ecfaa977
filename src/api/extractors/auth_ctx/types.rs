/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - slot は subject_id と role の 2 つだけ。どちらも一度だけ書き込まれる
 * - role slot には同じ lookup で得た email も入る (/admin/me 用)
 * - 書き込みは middleware (crate 内) からのみ。handler は読み取り専用
 */
use thiserror::Error;

use crate::repos::user_repo::Role;
use crate::services::auth::{ResolvedRole, SubjectId};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("role slot already written for this request")]
pub struct RoleAlreadySet;

/// Request-scoped identity: verified subject, then (optionally) the resolved role.
#[derive(Debug, Clone)]
pub struct IdentityCtx {
    subject_id: SubjectId,
    role: Option<ResolvedRole>,
}

impl IdentityCtx {
    /// Written by the verifier stage right after a successful verification.
    pub(crate) fn authenticated(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            role: None,
        }
    }

    /// Written by the resolver stage. A second write is a wiring defect.
    pub(crate) fn with_role(self, resolved: ResolvedRole) -> Result<Self, RoleAlreadySet> {
        if self.role.is_some() {
            return Err(RoleAlreadySet);
        }
        Ok(Self {
            role: Some(resolved),
            ..self
        })
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    /// `None` means the resolver did not run for this route.
    pub fn role(&self) -> Option<Role> {
        self.role.as_ref().map(|r| r.role)
    }

    /// `None` means the resolver did not run for this route.
    pub fn account_enabled(&self) -> Option<bool> {
        self.role.as_ref().map(|r| r.enabled)
    }

    pub fn resolved(&self) -> Option<&ResolvedRole> {
        self.role.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> IdentityCtx {
        IdentityCtx::authenticated(SubjectId::new("u1").unwrap())
    }

    #[test]
    fn role_slot_reads_absent_until_written() {
        let ctx = ctx();
        assert_eq!(ctx.subject_id().as_str(), "u1");
        assert_eq!(ctx.role(), None);
        assert_eq!(ctx.account_enabled(), None);
    }

    #[test]
    fn role_slot_is_write_once() {
        let resolved = ResolvedRole {
            role: Role::Admin,
            enabled: true,
            email: "u1@example.com".into(),
        };
        let ctx = ctx().with_role(resolved.clone()).unwrap();
        assert_eq!(ctx.role(), Some(Role::Admin));
        assert_eq!(ctx.account_enabled(), Some(true));
        assert_eq!(ctx.resolved().map(|r| r.email.as_str()), Some("u1@example.com"));

        assert_eq!(ctx.with_role(resolved).unwrap_err(), RoleAlreadySet);
    }
}
