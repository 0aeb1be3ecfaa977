/*
 * Responsibility
 * - GET / POST /supports/{id}/messages (認証のみ、role は見ない)
 * - 親 support が無ければ 404
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::support_messages::CreateMessageRequest,
        extractors::{AppJson, Identity, path_id::SupportId},
    },
    error::AppError,
    repos::support_message_repo::{NewSupportMessage, SupportMessage},
    state::AppState,
};

const ENTITY: &str = "support";

pub async fn list_messages(
    State(state): State<AppState>,
    support_id: SupportId,
) -> Result<Json<Vec<SupportMessage>>, AppError> {
    let messages = state
        .messages
        .list(support_id.id)
        .await
        .map_err(AppError::repo(ENTITY))?;

    Ok(Json(messages))
}

pub async fn create_message(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    support_id: SupportId,
    AppJson(req): AppJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<SupportMessage>), AppError> {
    let message = req.message()?.to_string();
    let sender_type = req.sender_type()?;

    let created = state
        .messages
        .create(NewSupportMessage {
            support_id: support_id.id,
            sender_type,
            sender_uid: ctx.subject_id().to_string(),
            message,
        })
        .await
        .map_err(AppError::repo(ENTITY))?;

    tracing::info!(
        support_id = %created.support_id,
        sender_uid = %created.sender_uid,
        %sender_type,
        "support message posted"
    );

    Ok((StatusCode::CREATED, Json(created)))
}
