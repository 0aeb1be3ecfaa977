/*
 * Responsibility
 * - products CRUD
 * - images は TEXT[] として保存
 */
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub series: String,
    pub category_id: Option<Uuid>,
    pub technical_overview: String,
    pub typical_application: String,
    pub images: Vec<String>,
    pub datasheet_url: String,
    pub is_active: bool,
}

/// Writable product fields (everything but the id).
#[derive(Debug, Clone)]
pub struct ProductFields<'a> {
    pub name: &'a str,
    pub brand: &'a str,
    pub series: &'a str,
    pub category_id: Option<Uuid>,
    pub technical_overview: &'a str,
    pub typical_application: &'a str,
    pub images: &'a [String],
    pub datasheet_url: &'a str,
    pub is_active: bool,
}

const COLUMNS: &str = "id, name, brand, series, category_id, technical_overview, \
                       typical_application, images, datasheet_url, is_active";

pub async fn list(pool: &PgPool) -> RepoResult<Vec<ProductRow>> {
    let sql = format!("SELECT {COLUMNS} FROM products ORDER BY name");
    let rows = sqlx::query_as::<_, ProductRow>(&sql).fetch_all(pool).await?;

    Ok(rows)
}

pub async fn get(pool: &PgPool, id: Uuid) -> RepoResult<ProductRow> {
    let sql = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or(RepoError::NotFound)
}

pub async fn create(pool: &PgPool, fields: &ProductFields<'_>) -> RepoResult<ProductRow> {
    let sql = format!(
        r#"
        INSERT INTO products (
            id, name, brand, series, category_id, technical_overview,
            typical_application, images, datasheet_url, is_active
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(fields.name)
        .bind(fields.brand)
        .bind(fields.series)
        .bind(fields.category_id)
        .bind(fields.technical_overview)
        .bind(fields.typical_application)
        .bind(fields.images)
        .bind(fields.datasheet_url)
        .bind(fields.is_active)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn update(pool: &PgPool, id: Uuid, fields: &ProductFields<'_>) -> RepoResult<ProductRow> {
    let sql = format!(
        r#"
        UPDATE products
        SET
            name = $2,
            brand = $3,
            series = $4,
            category_id = $5,
            technical_overview = $6,
            typical_application = $7,
            images = $8,
            datasheet_url = $9,
            is_active = $10
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .bind(fields.name)
        .bind(fields.brand)
        .bind(fields.series)
        .bind(fields.category_id)
        .bind(fields.technical_overview)
        .bind(fields.typical_application)
        .bind(fields.images)
        .bind(fields.datasheet_url)
        .bind(fields.is_active)
        .fetch_optional(pool)
        .await?;

    row.ok_or(RepoError::NotFound)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}
