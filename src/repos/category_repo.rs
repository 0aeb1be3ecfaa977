/*
 * Responsibility
 * - categories CRUD
 * - parent_id は同テーブルへの任意参照 (NULL = top level)
 */
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
}

pub async fn list(pool: &PgPool) -> RepoResult<Vec<CategoryRow>> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT id, name, parent_id
        FROM categories
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create(pool: &PgPool, name: &str, parent_id: Option<Uuid>) -> RepoResult<CategoryRow> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        INSERT INTO categories (id, name, parent_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, parent_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(parent_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    parent_id: Option<Uuid>,
) -> RepoResult<CategoryRow> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        UPDATE categories
        SET name = $2, parent_id = $3
        WHERE id = $1
        RETURNING id, name, parent_id
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(parent_id)
    .fetch_optional(pool)
    .await?;

    row.ok_or(RepoError::NotFound)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM categories
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}
