/*
 * Responsibility
 * - GET /admin/me
 * - role 解決済みだが active / role check はかけない (無効化された本人も自分の状態は見られる)
 * - account の読み込みは resolver stage の 1 回だけ。handler は context から組み立てる
 */
use axum::Json;

use crate::{
    api::{dto::users::MeResponse, extractors::Identity},
    error::AppError,
    middleware::auth::AccessError,
};

pub async fn me(Identity(ctx): Identity) -> Result<Json<MeResponse>, AppError> {
    let resolved = ctx.resolved().ok_or(AccessError::MissingRoleContext)?;

    Ok(Json(MeResponse {
        uid: ctx.subject_id().to_string(),
        email: resolved.email.clone(),
        role: resolved.role,
        is_active: resolved.enabled,
    }))
}
