/*
 * Responsibility
 * - users テーブル (Account Record) 向け SQLx 操作
 * - AccountStore trait: role 解決 / admin handler が使う境界 (テストでは in-memory 実装に差し替え)
 * - 見つからない場合は RepoError::NotFound / Option::None で表現する
 */
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sales,
    Client,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Sales, Role::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sales => "sales",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Account Record: subject → role / enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    #[serde(rename = "uid")]
    pub subject_id: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "is_active")]
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct AccountRow {
    subject_id: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepoError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|UnknownRole(r)| RepoError::InvalidData(format!("unknown role '{r}'")))?;

        Ok(Account {
            subject_id: row.subject_id,
            email: row.email,
            role,
            enabled: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Primary-key lookup. `Ok(None)` when no record exists.
    async fn find(&self, subject_id: &str) -> RepoResult<Option<Account>>;

    async fn list(&self) -> RepoResult<Vec<Account>>;

    /// `Err(RepoError::NotFound)` when the subject has no record.
    async fn update_role(&self, subject_id: &str, role: Role) -> RepoResult<()>;

    /// `Err(RepoError::NotFound)` when the subject has no record.
    async fn update_status(&self, subject_id: &str, enabled: bool) -> RepoResult<()>;
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for UserRepo {
    async fn find(&self, subject_id: &str) -> RepoResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT subject_id, email, role, is_active, created_at
            FROM users
            WHERE subject_id = $1
            "#,
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn list(&self) -> RepoResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT subject_id, email, role, is_active, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn update_role(&self, subject_id: &str, role: Role) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET role = $2
            WHERE subject_id = $1
            "#,
        )
        .bind(subject_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update_status(&self, subject_id: &str, enabled: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_active = $2
            WHERE subject_id = $1
            "#,
        )
        .bind(subject_id)
        .bind(enabled)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_from_lowercase_names_only() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("sales".parse::<Role>(), Ok(Role::Sales));
        assert_eq!("client".parse::<Role>(), Ok(Role::Client));
        assert_eq!(
            "Admin".parse::<Role>(),
            Err(UnknownRole("Admin".to_string()))
        );
    }

    #[test]
    fn row_with_unknown_role_is_invalid_data() {
        let row = AccountRow {
            subject_id: "u1".into(),
            email: "u1@example.com".into(),
            role: "owner".into(),
            is_active: true,
            created_at: Utc::now(),
        };

        assert!(matches!(
            Account::try_from(row),
            Err(RepoError::InvalidData(_))
        ));
    }
}
