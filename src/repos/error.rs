/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - 呼び出し側はメッセージ文字列ではなく variant で分岐する
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("row not found")]
    NotFound,
    #[error("store unavailable")]
    Unavailable(#[source] sqlx::Error),
    /// The caller's upstream deadline ran out before the store answered.
    #[error("store call exceeded deadline")]
    DeadlineExceeded,
    #[error("invalid stored data: {0}")]
    InvalidData(String),
    #[error("db error")]
    Db(#[source] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Classify a driver error: connectivity problems are `Unavailable`,
    /// everything else is a plain `Db` failure.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => RepoError::Unavailable(e),
            other => RepoError::Db(other),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, RepoError::Unavailable(_) | RepoError::DeadlineExceeded)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::from_sqlx(e)
    }
}
