//! Role stages: resolve the caller's account, then gate on it.
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::extractors::IdentityCtx;
use crate::error::AppError;
use crate::repos::user_repo::Role;
use crate::state::AppState;

use super::AccessError;
use super::guard::{check_active, check_role};

fn identity(req: &Request<Body>) -> Result<&IdentityCtx, AccessError> {
    req.extensions()
        .get::<IdentityCtx>()
        .ok_or(AccessError::Unauthenticated)
}

fn report_wiring(err: &AccessError, path: &str) {
    if matches!(
        err,
        AccessError::MissingRoleContext | AccessError::RoleWrittenTwice
    ) {
        tracing::error!(failure = "wiring", error = %err, %path, "access pipeline misconfigured");
    }
}

pub(crate) async fn resolve_role(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = identity(&req)?.clone();
    let resolved = state.resolver.resolve(ctx.subject_id()).await?;

    let ctx = ctx.with_role(resolved).map_err(|_| {
        let err = AccessError::RoleWrittenTwice;
        report_wiring(&err, req.uri().path());
        err
    })?;
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

pub(crate) async fn require_active(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let ctx = identity(&req)?;

    if let Err(err) = check_active(ctx) {
        match err {
            AccessError::AccountDisabled => tracing::warn!(
                subject_id = %ctx.subject_id(),
                failure = "authorization",
                "disabled account rejected"
            ),
            _ => report_wiring(&err, req.uri().path()),
        }
        return Err(err.into());
    }

    Ok(next.run(req).await)
}

pub(crate) async fn require_role(
    State(required): State<Role>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = identity(&req)?;

    if let Err(err) = check_role(ctx, required) {
        match &err {
            AccessError::InsufficientPermissions { actual, .. } => tracing::warn!(
                subject_id = %ctx.subject_id(),
                failure = "authorization",
                %required,
                %actual,
                "insufficient role"
            ),
            _ => report_wiring(&err, req.uri().path()),
        }
        return Err(err.into());
    }

    Ok(next.run(req).await)
}
