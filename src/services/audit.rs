//! Best-effort audit emission for admin mutations.
//!
//! `record` never fails the caller: no subject means no store call, and a
//! store failure is logged and dropped.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::extractors::IdentityCtx;
use crate::repos::audit_repo::{AuditLogRow, AuditStore, NewAuditEntry};
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    StatusUpdated,
    RoleUpdated,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
            AuditAction::StatusUpdated => "status_updated",
            AuditAction::RoleUpdated => "role_updated",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct AuditLogger {
    store: Arc<dyn AuditStore>,
    timeout: Duration,
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AuditLogger {
    pub fn new(store: Arc<dyn AuditStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn record(
        &self,
        actor: Option<&IdentityCtx>,
        action: AuditAction,
        entity: &'static str,
        entity_id: &str,
    ) {
        let Some(actor) = actor else {
            tracing::debug!(%action, entity, "no authenticated subject, audit skipped");
            return;
        };

        let entry = NewAuditEntry {
            actor_uid: actor.subject_id().as_str().to_string(),
            action: action.as_str().to_string(),
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
        };

        let outcome = tokio::time::timeout(self.timeout, self.store.append(entry)).await;

        let err = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(err)) => err.to_string(),
            Err(_) => "deadline exceeded".to_string(),
        };
        tracing::warn!(
            actor_uid = %actor.subject_id(),
            %action,
            entity,
            entity_id,
            error = %err,
            "audit write failed"
        );
    }

    pub async fn list(&self) -> RepoResult<Vec<AuditLogRow>> {
        tokio::time::timeout(self.timeout, self.store.list())
            .await
            .map_err(|_| RepoError::DeadlineExceeded)?
    }
}
