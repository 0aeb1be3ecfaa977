/*
 * Responsibility
 * - audit_logs テーブルへの追記 / 一覧
 * - AuditStore trait 経由で AuditLogger から使う
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// One audited action, as handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub actor_uid: String,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuditLogRow {
    pub id: Uuid,
    pub actor_uid: String,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, entry: NewAuditEntry) -> RepoResult<()>;

    /// Newest first.
    async fn list(&self) -> RepoResult<Vec<AuditLogRow>>;
}

#[derive(Clone, Debug)]
pub struct AuditRepo {
    pool: PgPool,
}

impl AuditRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for AuditRepo {
    async fn append(&self, entry: NewAuditEntry) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, actor_uid, action, entity, entity_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&entry.actor_uid)
        .bind(&entry.action)
        .bind(&entry.entity)
        .bind(&entry.entity_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> RepoResult<Vec<AuditLogRow>> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, actor_uid, action, entity, entity_id, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
