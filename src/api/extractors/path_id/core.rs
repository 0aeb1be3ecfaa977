/*
 * Responsibility
 * - Path の String を受け、空チェック → リソースごとの ID 型へ変換する
 * - 失敗時は 400 (MISSING_PATH_PARAMETER / INVALID_ID) に変換
 * - repo を呼ぶ前に必ずここを通す (不正な path が storage に届かない)
 * 置くもの
 *  - PathId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts<AppState> for PathId<T>
 *  - 純粋関数 require_segment
 * 置かないもの
 *  - Category / Product / User といった具体リソース名 (types.rs)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use thiserror::Error;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathParamError {
    #[error("path parameter '{0}' is required")]
    MissingPathParameter(&'static str),
    #[error("path parameter '{0}' is not a valid id")]
    InvalidId(&'static str),
}

/// Per-resource description of a path identifier.
pub trait PathIdKind {
    type Id: Clone + Send + Sync;

    /// Parameter name, for diagnostics.
    const PARAM: &'static str;

    fn parse(segment: &str) -> Option<Self::Id>;
}

/// Trimmed, non-empty segment or `MissingPathParameter`. No side effects.
pub fn require_segment<'a>(raw: &'a str, param: &'static str) -> Result<&'a str, PathParamError> {
    let segment = raw.trim();
    if segment.is_empty() {
        return Err(PathParamError::MissingPathParameter(param));
    }
    Ok(segment)
}

/// Validate a raw segment into a typed id.
pub fn parse_path_id<T: PathIdKind>(raw: &str) -> Result<T::Id, PathParamError> {
    let segment = require_segment(raw, T::PARAM)?;
    T::parse(segment).ok_or(PathParamError::InvalidId(T::PARAM))
}

pub struct PathId<T: PathIdKind> {
    pub id: T::Id,
    _marker: PhantomData<T>,
}

impl<T: PathIdKind> PathId<T> {
    fn new(id: T::Id) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> FromRequestParts<AppState> for PathId<T>
where
    T: PathIdKind + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| PathParamError::MissingPathParameter(T::PARAM))?;

        Ok(Self::new(parse_path_id::<T>(&raw)?))
    }
}

impl<T: PathIdKind> std::fmt::Debug for PathId<T>
where
    T::Id: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathId")
            .field(T::PARAM, &self.id)
            .finish()
    }
}
