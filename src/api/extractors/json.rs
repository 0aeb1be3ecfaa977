//! `Json<T>` with the app's error body on rejection (`INVALID_BODY`, 400).
//!
//! A body cut off by the body limit stays 413 (`PAYLOAD_TOO_LARGE`).
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_body(rejection)),
        }
    }
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("request body exceeded limit");
        return AppError::PayloadTooLarge;
    }
    tracing::debug!(error = %rejection.body_text(), "request body rejected");
    AppError::bad_request("INVALID_BODY", "invalid request body")
}
