/*
 * Responsibility
 * - GET /categories (公開)
 * - /admin/categories 系 CRUD (admin)
 * - 変更系は audit を残す (失敗しても本処理は成功扱い)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::{DeletedResponse, categories::CategoryRequest},
        extractors::{AppJson, Identity, path_id::CategoryId},
    },
    error::AppError,
    repos::category_repo::{self, CategoryRow},
    services::audit::AuditAction,
    state::AppState,
};

const ENTITY: &str = "category";

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryRow>>, AppError> {
    let rows = category_repo::list(&state.db).await?;
    Ok(Json(rows))
}

pub async fn create_category(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    AppJson(req): AppJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryRow>), AppError> {
    req.validate()?;

    let row = category_repo::create(&state.db, req.name.trim(), req.parent_id).await?;

    state
        .audit
        .record(Some(&ctx), AuditAction::Created, ENTITY, &row.id.to_string())
        .await;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    category_id: CategoryId,
    AppJson(req): AppJson<CategoryRequest>,
) -> Result<Json<CategoryRow>, AppError> {
    req.validate()?;

    let row = category_repo::update(&state.db, category_id.id, req.name.trim(), req.parent_id)
        .await
        .map_err(AppError::repo(ENTITY))?;

    state
        .audit
        .record(Some(&ctx), AuditAction::Updated, ENTITY, &row.id.to_string())
        .await;

    Ok(Json(row))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    category_id: CategoryId,
) -> Result<Json<DeletedResponse>, AppError> {
    category_repo::delete(&state.db, category_id.id)
        .await
        .map_err(AppError::repo(ENTITY))?;

    let id = category_id.id.to_string();
    state
        .audit
        .record(Some(&ctx), AuditAction::Deleted, ENTITY, &id)
        .await;

    Ok(Json(DeletedResponse {
        id,
        message: "Category deleted successfully".into(),
    }))
}
