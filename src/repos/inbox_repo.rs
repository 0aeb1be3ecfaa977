/*
 * Responsibility
 * - 公開フォームから投稿される info request / support ticket の保存と一覧
 * - 2 つのテーブルは同じ形 (status + 任意 JSON data) なので Inbox で切り替える
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

pub const STATUS_OPEN: &str = "open";
pub const STATUS_CLOSED: &str = "closed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbox {
    InfoRequests,
    Supports,
}

impl Inbox {
    fn table(self) -> &'static str {
        match self {
            Inbox::InfoRequests => "info_requests",
            Inbox::Supports => "supports",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InboxRow {
    pub id: Uuid,
    pub status: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

pub async fn create(pool: &PgPool, inbox: Inbox, data: &serde_json::Value) -> RepoResult<InboxRow> {
    let sql = format!(
        r#"
        INSERT INTO {} (id, status, data)
        VALUES ($1, $2, $3)
        RETURNING id, status, data, created_at
        "#,
        inbox.table()
    );

    let row = sqlx::query_as::<_, InboxRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(STATUS_OPEN)
        .bind(data)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn list(pool: &PgPool, inbox: Inbox) -> RepoResult<Vec<InboxRow>> {
    let sql = format!(
        "SELECT id, status, data, created_at FROM {} ORDER BY created_at DESC",
        inbox.table()
    );

    let rows = sqlx::query_as::<_, InboxRow>(&sql).fetch_all(pool).await?;

    Ok(rows)
}

pub async fn update_status(pool: &PgPool, inbox: Inbox, id: Uuid, status: &str) -> RepoResult<()> {
    let sql = format!("UPDATE {} SET status = $2 WHERE id = $1", inbox.table());

    let result = sqlx::query(&sql).bind(id).bind(status).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

pub async fn count_by_status(pool: &PgPool, inbox: Inbox, status: &str) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE status = $1", inbox.table());

    let n: i64 = sqlx::query_scalar(&sql).bind(status).fetch_one(pool).await?;

    Ok(n)
}

pub async fn count(pool: &PgPool, inbox: Inbox) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", inbox.table());

    let n: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;

    Ok(n)
}
