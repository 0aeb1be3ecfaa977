/*
 * Responsibility
 * - POST /request-info, POST /support (公開フォーム)
 * - GET /admin/requests, GET /admin/supports, PATCH /admin/support/{id}
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::inbox::{CreateInboxRequest, CreatedInboxResponse, UpdateStatusRequest},
        extractors::{AppJson, Identity, path_id::SupportId},
    },
    error::AppError,
    repos::inbox_repo::{self, Inbox, InboxRow},
    services::audit::AuditAction,
    state::AppState,
};

async fn submit(
    state: &AppState,
    inbox: Inbox,
    req: CreateInboxRequest,
) -> Result<(StatusCode, Json<CreatedInboxResponse>), AppError> {
    let data = req.into_data()?;
    let row = inbox_repo::create(&state.db, inbox, &data).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedInboxResponse {
            id: row.id,
            status: row.status,
        }),
    ))
}

pub async fn create_request_info(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateInboxRequest>,
) -> Result<(StatusCode, Json<CreatedInboxResponse>), AppError> {
    submit(&state, Inbox::InfoRequests, req).await
}

pub async fn create_support(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateInboxRequest>,
) -> Result<(StatusCode, Json<CreatedInboxResponse>), AppError> {
    submit(&state, Inbox::Supports, req).await
}

pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<InboxRow>>, AppError> {
    Ok(Json(inbox_repo::list(&state.db, Inbox::InfoRequests).await?))
}

pub async fn list_supports(
    State(state): State<AppState>,
) -> Result<Json<Vec<InboxRow>>, AppError> {
    Ok(Json(inbox_repo::list(&state.db, Inbox::Supports).await?))
}

pub async fn update_support_status(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    support_id: SupportId,
    AppJson(req): AppJson<UpdateStatusRequest>,
) -> Result<Json<CreatedInboxResponse>, AppError> {
    let status = req.status()?;

    inbox_repo::update_status(&state.db, Inbox::Supports, support_id.id, status)
        .await
        .map_err(AppError::repo("support"))?;

    state
        .audit
        .record(
            Some(&ctx),
            AuditAction::StatusUpdated,
            "support",
            &support_id.id.to_string(),
        )
        .await;

    Ok(Json(CreatedInboxResponse {
        id: support_id.id,
        status: status.to_string(),
    }))
}
