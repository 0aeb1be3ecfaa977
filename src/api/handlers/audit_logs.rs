use axum::{Json, extract::State};

use crate::{error::AppError, repos::audit_repo::AuditLogRow, state::AppState};

/// GET /admin/audit-logs (newest first)
pub async fn list_audit_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuditLogRow>>, AppError> {
    Ok(Json(state.audit.list().await?))
}
