/*
 * Responsibility
 * - GET /products, GET /products/{id} (公開)
 * - /admin/products 系 CRUD (admin, audit 付き)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::{DeletedResponse, products::ProductRequest},
        extractors::{AppJson, Identity, path_id::ProductId},
    },
    error::AppError,
    repos::product_repo::{self, ProductRow},
    services::audit::AuditAction,
    state::AppState,
};

const ENTITY: &str = "product";

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductRow>>, AppError> {
    let rows = product_repo::list(&state.db).await?;
    Ok(Json(rows))
}

pub async fn get_product(
    State(state): State<AppState>,
    product_id: ProductId,
) -> Result<Json<ProductRow>, AppError> {
    let row = product_repo::get(&state.db, product_id.id)
        .await
        .map_err(AppError::repo(ENTITY))?;

    Ok(Json(row))
}

pub async fn create_product(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    AppJson(req): AppJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductRow>), AppError> {
    req.validate()?;

    let row = product_repo::create(&state.db, &req.fields()).await?;

    state
        .audit
        .record(Some(&ctx), AuditAction::Created, ENTITY, &row.id.to_string())
        .await;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    product_id: ProductId,
    AppJson(req): AppJson<ProductRequest>,
) -> Result<Json<ProductRow>, AppError> {
    req.validate()?;

    let row = product_repo::update(&state.db, product_id.id, &req.fields())
        .await
        .map_err(AppError::repo(ENTITY))?;

    state
        .audit
        .record(Some(&ctx), AuditAction::Updated, ENTITY, &row.id.to_string())
        .await;

    Ok(Json(row))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    product_id: ProductId,
) -> Result<Json<DeletedResponse>, AppError> {
    product_repo::delete(&state.db, product_id.id)
        .await
        .map_err(AppError::repo(ENTITY))?;

    let id = product_id.id.to_string();
    state
        .audit
        .record(Some(&ctx), AuditAction::Deleted, ENTITY, &id)
        .await;

    Ok(Json(DeletedResponse {
        id,
        message: "Product deleted successfully".into(),
    }))
}
