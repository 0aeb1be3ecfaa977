/*
 * Responsibility
 * - URL 構造を定義し、route group ごとに access pipeline を明示的に選ぶ
 *   - public: pipeline なし
 *   - authenticated: credential 検証のみ (/protected, support message thread)
 *   - account: 検証 → role 解決 (active / role check なし)
 *   - admin: 検証 → role 解決 → active → role == admin
 * - 未知の path は 404、既知 path の未知 method は 405 (どちらも JSON error body)
 * - id が空の末尾スラッシュ形 (/admin/categories/ など) は 400 MISSING_PATH_PARAMETER
 */
use axum::{
    Router,
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};

use crate::{
    api::extractors::path_id::PathParamError,
    api::handlers::{
        audit_logs::list_audit_logs,
        categories::{create_category, delete_category, list_categories, update_category},
        health::health,
        inbox::{
            create_request_info, create_support, list_requests, list_supports,
            update_support_status,
        },
        me::me,
        products::{create_product, delete_product, get_product, list_products, update_product},
        protected::protected,
        stats::summary,
        support_messages::{create_message, list_messages},
        users::{list_users, update_user_role, update_user_status},
    },
    error::AppError,
    middleware::auth::AccessPipeline,
    repos::user_repo::Role,
    state::AppState,
};

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/categories", get(list_categories))
        .route("/products", get(list_products))
        .route("/products/", get(missing_id))
        .route("/products/{id}", get(get_product))
        .route("/request-info", post(create_request_info))
        .route("/support", post(create_support))
}

fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/protected", get(protected))
        .route(
            "/supports/{id}/messages",
            get(list_messages).post(create_message),
        )
}

fn account_routes() -> Router<AppState> {
    Router::new().route("/admin/me", get(me))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/categories",
            get(list_categories).post(create_category),
        )
        .route("/admin/categories/", put(missing_id).delete(missing_id))
        .route(
            "/admin/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/admin/products", get(list_products).post(create_product))
        .route("/admin/products/", put(missing_id).delete(missing_id))
        .route(
            "/admin/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/admin/requests", get(list_requests))
        .route("/admin/supports", get(list_supports))
        .route("/admin/support/", patch(missing_id))
        .route("/admin/support/{id}", patch(update_support_status))
        .route("/admin/users", get(list_users))
        .route("/admin/users/{uid}/role", patch(update_user_role))
        .route("/admin/users/{uid}/status", patch(update_user_status))
        .route("/admin/stats/summary", get(summary))
        .route("/admin/audit-logs", get(list_audit_logs))
}

pub fn routes(state: AppState) -> Router<AppState> {
    let authenticated = AccessPipeline::new(state.clone())
        .authenticate()
        .wrap(authenticated_routes());

    let account = AccessPipeline::new(state.clone())
        .authenticate()
        .resolve_role()
        .wrap(account_routes());

    let admin = AccessPipeline::new(state)
        .authenticate()
        .resolve_role()
        .require_active()
        .require_role(Role::Admin)
        .wrap(admin_routes());

    Router::new()
        .merge(public_routes())
        .merge(authenticated)
        .merge(account)
        .merge(admin)
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed_body))
}

async fn not_found() -> AppError {
    AppError::not_found("route")
}

/// Item path with the id segment left empty.
async fn missing_id() -> AppError {
    PathParamError::MissingPathParameter("id").into()
}

/// axum answers an unmatched method with an empty 405; give it the JSON error body.
async fn method_not_allowed_body(res: Response) -> Response {
    if res.status() != StatusCode::METHOD_NOT_ALLOWED
        || res.headers().contains_key(header::CONTENT_TYPE)
    {
        return res;
    }

    let allow = res.headers().get(header::ALLOW).cloned();
    let mut normalized = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        normalized.headers_mut().insert(header::ALLOW, allow);
    }
    normalized
}
