/*
 * Responsibility
 * - 認証 / 認可 stage を束ねる
 *   - access: credential 検証 → IdentityCtx を extensions に入れる
 *   - role: role 解決 → active / role check
 *   - pipeline: stage の並びを型で縛る builder
 * - AccessError (guard の失敗) の定義
 */
mod access;
mod guard;
mod pipeline;
mod role;

use axum::http::StatusCode;
use thiserror::Error;

use crate::repos::user_repo::Role;

pub use pipeline::AccessPipeline;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("account is disabled")]
    AccountDisabled,
    #[error("role '{required}' required")]
    InsufficientPermissions { required: Role, actual: Role },
    /// Role check ran without a resolver stage before it.
    #[error("role context missing")]
    MissingRoleContext,
    /// Resolver ran twice for one request.
    #[error("role context written twice")]
    RoleWrittenTwice,
}

impl AccessError {
    pub fn status(&self) -> StatusCode {
        match self {
            AccessError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AccessError::AccountDisabled | AccessError::InsufficientPermissions { .. } => {
                StatusCode::FORBIDDEN
            }
            AccessError::MissingRoleContext | AccessError::RoleWrittenTwice => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated => "MISSING_CREDENTIAL",
            AccessError::AccountDisabled => "ACCOUNT_DISABLED",
            AccessError::InsufficientPermissions { .. } => "INSUFFICIENT_PERMISSIONS",
            AccessError::MissingRoleContext => "MISSING_ROLE_CONTEXT",
            AccessError::RoleWrittenTwice => "INTERNAL_SERVER_ERROR",
        }
    }
}
