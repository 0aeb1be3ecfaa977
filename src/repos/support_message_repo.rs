/*
 * Responsibility
 * - support_messages テーブル (support ticket ごとのメッセージスレッド)
 * - SupportMessageStore trait 経由で handler から使う (テストでは in-memory 実装)
 * - 親の support が無い場合は RepoError::NotFound
 */
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Client,
    Admin,
}

impl SenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderType::Client => "client",
            SenderType::Admin => "admin",
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSenderType(pub String);

impl FromStr for SenderType {
    type Err = UnknownSenderType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(SenderType::Client),
            "admin" => Ok(SenderType::Admin),
            other => Err(UnknownSenderType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportMessage {
    pub id: Uuid,
    pub support_id: Uuid,
    pub sender_type: SenderType,
    pub sender_uid: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupportMessage {
    pub support_id: Uuid,
    pub sender_type: SenderType,
    pub sender_uid: String,
    pub message: String,
}

#[derive(Debug, FromRow)]
struct SupportMessageRow {
    id: Uuid,
    support_id: Uuid,
    sender_type: String,
    sender_uid: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SupportMessageRow> for SupportMessage {
    type Error = RepoError;

    fn try_from(row: SupportMessageRow) -> Result<Self, Self::Error> {
        let sender_type = row
            .sender_type
            .parse::<SenderType>()
            .map_err(|UnknownSenderType(s)| {
                RepoError::InvalidData(format!("unknown sender_type '{s}'"))
            })?;

        Ok(SupportMessage {
            id: row.id,
            support_id: row.support_id,
            sender_type,
            sender_uid: row.sender_uid,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
pub trait SupportMessageStore: Send + Sync {
    /// Oldest first. `Err(RepoError::NotFound)` when the support ticket does not exist.
    async fn list(&self, support_id: Uuid) -> RepoResult<Vec<SupportMessage>>;

    /// `Err(RepoError::NotFound)` when the support ticket does not exist.
    async fn create(&self, new: NewSupportMessage) -> RepoResult<SupportMessage>;
}

#[derive(Clone, Debug)]
pub struct SupportMessageRepo {
    pool: PgPool,
}

impl SupportMessageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupportMessageStore for SupportMessageRepo {
    async fn list(&self, support_id: Uuid) -> RepoResult<Vec<SupportMessage>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM supports WHERE id = $1)")
                .bind(support_id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(RepoError::NotFound);
        }

        let rows = sqlx::query_as::<_, SupportMessageRow>(
            r#"
            SELECT id, support_id, sender_type, sender_uid, message, created_at
            FROM support_messages
            WHERE support_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(support_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SupportMessage::try_from).collect()
    }

    async fn create(&self, new: NewSupportMessage) -> RepoResult<SupportMessage> {
        let row = sqlx::query_as::<_, SupportMessageRow>(
            r#"
            INSERT INTO support_messages (id, support_id, sender_type, sender_uid, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, support_id, sender_type, sender_uid, message, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.support_id)
        .bind(new.sender_type.as_str())
        .bind(&new.sender_uid)
        .bind(&new.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // parent ticket missing
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => RepoError::NotFound,
            other => RepoError::from_sqlx(other),
        })?;

        SupportMessage::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_types_are_client_or_admin() {
        assert_eq!("client".parse::<SenderType>(), Ok(SenderType::Client));
        assert_eq!("admin".parse::<SenderType>(), Ok(SenderType::Admin));
        assert!("sales".parse::<SenderType>().is_err());
    }

    #[test]
    fn row_with_unknown_sender_is_invalid_data() {
        let row = SupportMessageRow {
            id: Uuid::new_v4(),
            support_id: Uuid::new_v4(),
            sender_type: "bot".into(),
            sender_uid: "u1".into(),
            message: "hello".into(),
            created_at: Utc::now(),
        };

        assert!(matches!(
            SupportMessage::try_from(row),
            Err(RepoError::InvalidData(_))
        ));
    }
}
