/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - pipeline 各 stage の error / RepoError / path error を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::dto::FieldError;
use crate::api::extractors::path_id::PathParamError;
use crate::middleware::auth::AccessError;
use crate::repos::error::RepoError;
use crate::services::auth::{CredentialError, ResolveError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error(transparent)]
    Credential(CredentialError),
    #[error(transparent)]
    Access(AccessError),
    #[error("account not found")]
    AccountNotFound,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("request timed out")]
    RequestTimeout,
    #[error("{dependency} unavailable")]
    Unavailable { dependency: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Repo error → AppError, naming the resource for the 404 case.
    ///
    /// ```ignore
    /// category_repo::delete(&state.db, id).await.map_err(AppError::repo("category"))?;
    /// ```
    pub fn repo(resource: &'static str) -> impl FnOnce(RepoError) -> AppError {
        move |e| match e {
            RepoError::NotFound => AppError::not_found(resource),
            other => AppError::from(other),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, *code, message.clone())
            }
            AppError::Credential(e) => {
                let status = match e {
                    CredentialError::ProviderUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::UNAUTHORIZED,
                };
                (status, e.code(), e.to_string())
            }
            AppError::Access(e) => (e.status(), e.code(), e.to_string()),
            AppError::AccountNotFound => (
                StatusCode::NOT_FOUND,
                "ACCOUNT_NOT_FOUND",
                "account not found".into(),
            ),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{resource} not found."),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "method not allowed".into(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "request body too large".into(),
            ),
            AppError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "request timed out".into(),
            ),
            AppError::Unavailable { dependency } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                format!("{dependency} unavailable"),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        AppError::Credential(e)
    }
}

impl From<AccessError> for AppError {
    fn from(e: AccessError) -> Self {
        AppError::Access(e)
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::AccountNotFound => AppError::AccountNotFound,
            ResolveError::StoreUnavailable => AppError::Unavailable {
                dependency: "account store",
            },
            ResolveError::Store(_) => AppError::Internal,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound => AppError::not_found("resource"),
            RepoError::Unavailable(err) => {
                tracing::error!(failure = "dependency", error = ?err, "store unavailable");
                AppError::Unavailable { dependency: "store" }
            }
            RepoError::DeadlineExceeded => {
                tracing::error!(failure = "dependency", "store call exceeded deadline");
                AppError::Unavailable { dependency: "store" }
            }
            RepoError::InvalidData(detail) => {
                tracing::error!(%detail, "invalid stored data");
                AppError::Internal
            }
            RepoError::Db(err) => {
                tracing::error!(error = ?err, "db error");
                AppError::Internal
            }
        }
    }
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::bad_request(e.code, e.message)
    }
}

impl From<PathParamError> for AppError {
    fn from(e: PathParamError) -> Self {
        let code = match e {
            PathParamError::MissingPathParameter(_) => "MISSING_PATH_PARAMETER",
            PathParamError::InvalidId(_) => "INVALID_ID",
        };
        AppError::bad_request(code, e.to_string())
    }
}
