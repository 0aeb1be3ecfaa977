/*
 * Responsibility
 * - ダッシュボード用の件数集計
 */
use serde::Serialize;
use sqlx::PgPool;

use crate::repos::error::RepoResult;
use crate::repos::inbox_repo::{self, Inbox, STATUS_CLOSED, STATUS_OPEN};

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_products: i64,
    pub total_categories: i64,
    pub total_requests: i64,
    pub support_open: i64,
    pub support_closed: i64,
}

async fn count_table(pool: &PgPool, table: &'static str) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    let n: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
    Ok(n)
}

pub async fn summary(pool: &PgPool) -> RepoResult<Summary> {
    Ok(Summary {
        total_products: count_table(pool, "products").await?,
        total_categories: count_table(pool, "categories").await?,
        total_requests: inbox_repo::count(pool, Inbox::InfoRequests).await?,
        support_open: inbox_repo::count_by_status(pool, Inbox::Supports, STATUS_OPEN).await?,
        support_closed: inbox_repo::count_by_status(pool, Inbox::Supports, STATUS_CLOSED).await?,
    })
}
