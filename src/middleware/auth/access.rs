//! Authentication stages.
//!
//! `authenticate` verifies the `Authorization` header (one provider call) and
//! writes the subject into a fresh `IdentityCtx` in the request extensions.
//! `require_subject` rejects any request that reaches it without one.
use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::api::extractors::IdentityCtx;
use crate::error::AppError;
use crate::state::AppState;

use super::guard::check_subject;

pub(crate) async fn authenticate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let subject = state
        .verifier
        .verify(req.headers().get(header::AUTHORIZATION))
        .await?;

    tracing::debug!(subject_id = %subject, "credential verified");

    // middleware → extractor への受け渡し
    req.extensions_mut()
        .insert(IdentityCtx::authenticated(subject));

    Ok(next.run(req).await)
}

pub(crate) async fn require_subject(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    if let Err(err) = check_subject(req.extensions().get::<IdentityCtx>()) {
        tracing::warn!(
            failure = "authentication",
            path = %req.uri().path(),
            "no authenticated subject"
        );
        return Err(err.into());
    }

    Ok(next.run(req).await)
}
