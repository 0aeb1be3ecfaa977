/*
 * Responsibility
 * - /admin/users 系 handler
 * - uid は identity provider の subject id (UUID ではない) なので空チェックのみ
 * - 存在しない uid は RepoError::NotFound → 404
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::users::{
            RoleUpdatedResponse, StatusUpdatedResponse, UpdateRoleRequest,
            UpdateUserStatusRequest,
        },
        extractors::{AppJson, Identity, path_id::UserUid},
    },
    error::AppError,
    repos::user_repo::Account,
    services::audit::AuditAction,
    state::AppState,
};

const ENTITY: &str = "user";

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = state.accounts.list().await?;
    Ok(Json(accounts))
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    uid: UserUid,
    AppJson(req): AppJson<UpdateRoleRequest>,
) -> Result<Json<RoleUpdatedResponse>, AppError> {
    let role = req.role()?;

    state
        .accounts
        .update_role(&uid.id, role)
        .await
        .map_err(AppError::repo(ENTITY))?;

    state
        .audit
        .record(Some(&ctx), AuditAction::RoleUpdated, ENTITY, &uid.id)
        .await;

    Ok(Json(RoleUpdatedResponse { uid: uid.id, role }))
}

pub async fn update_user_status(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    uid: UserUid,
    AppJson(req): AppJson<UpdateUserStatusRequest>,
) -> Result<Json<StatusUpdatedResponse>, AppError> {
    let is_active = req.is_active()?;

    state
        .accounts
        .update_status(&uid.id, is_active)
        .await
        .map_err(AppError::repo(ENTITY))?;

    state
        .audit
        .record(Some(&ctx), AuditAction::StatusUpdated, ENTITY, &uid.id)
        .await;

    Ok(Json(StatusUpdatedResponse {
        uid: uid.id,
        is_active,
    }))
}
