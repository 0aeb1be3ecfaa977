//! Role Resolver: verified subject → role + enabled flag, read fresh per request.
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{AccountStore, Role};
use crate::services::auth::provider::SubjectId;

/// What the resolver writes into the identity context.
///
/// `enabled` is carried along but not enforced here; see `require_active`.
/// `email` comes from the same read so `/admin/me` needs no second lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub role: Role,
    pub enabled: bool,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Valid credential, but no account record (e.g. deleted account, token still live).
    #[error("account not found")]
    AccountNotFound,
    #[error("account store unavailable")]
    StoreUnavailable,
    #[error("account lookup failed: {0}")]
    Store(#[source] RepoError),
}

#[derive(Clone)]
pub struct RoleResolver {
    accounts: Arc<dyn AccountStore>,
    timeout: Duration,
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RoleResolver {
    pub fn new(accounts: Arc<dyn AccountStore>, timeout: Duration) -> Self {
        Self { accounts, timeout }
    }

    pub async fn resolve(&self, subject: &SubjectId) -> Result<ResolvedRole, ResolveError> {
        let lookup = tokio::time::timeout(self.timeout, self.accounts.find(subject.as_str()))
            .await
            .map_err(|_| {
                tracing::error!(
                    subject_id = %subject,
                    failure = "dependency",
                    "account lookup exceeded deadline"
                );
                ResolveError::StoreUnavailable
            })?;

        match lookup {
            Ok(Some(account)) => Ok(ResolvedRole {
                role: account.role,
                enabled: account.enabled,
                email: account.email,
            }),
            Ok(None) | Err(RepoError::NotFound) => {
                tracing::warn!(
                    subject_id = %subject,
                    failure = "authorization",
                    "verified subject has no account record"
                );
                Err(ResolveError::AccountNotFound)
            }
            Err(err) if err.is_unavailable() => {
                tracing::error!(
                    subject_id = %subject,
                    failure = "dependency",
                    error = ?err,
                    "account store unavailable"
                );
                Err(ResolveError::StoreUnavailable)
            }
            Err(err) => {
                tracing::error!(subject_id = %subject, error = ?err, "account lookup failed");
                Err(ResolveError::Store(err))
            }
        }
    }
}
