use axum::{Json, extract::State};

use crate::{
    error::AppError,
    repos::stats_repo::{self, Summary},
    state::AppState,
};

/// GET /admin/stats/summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    Ok(Json(stats_repo::summary(&state.db).await?))
}
