//! In-memory collaborators for unit and router tests.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::config::{AppEnv, Config, IdentityProviderConfig};
use crate::repos::audit_repo::{AuditLogRow, AuditStore, NewAuditEntry};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::support_message_repo::{
    NewSupportMessage, SupportMessage, SupportMessageStore,
};
use crate::repos::user_repo::{Account, AccountStore, Role};
use crate::services::audit::AuditLogger;
use crate::services::auth::provider::ProviderError;
use crate::services::auth::{CredentialVerifier, IdentityProvider, RoleResolver, SubjectId};
use crate::state::AppState;

pub const UPSTREAM_TIMEOUT: Duration = Duration::from_millis(200);

fn outage() -> RepoError {
    RepoError::Unavailable(sqlx::Error::PoolTimedOut)
}

/// Token → subject table. Unknown tokens are rejected.
#[derive(Default)]
pub struct StaticProvider {
    tokens: HashMap<String, String>,
    delay: Option<Duration>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: &str, subject: &str) -> Self {
        self.tokens.insert(token.to_string(), subject.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn verify_token(&self, token: &str) -> Result<SubjectId, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable {
            return Err(ProviderError::Unavailable("connection refused".into()));
        }

        self.tokens
            .get(token)
            .and_then(|s| SubjectId::new(s.as_str()))
            .ok_or_else(|| ProviderError::Rejected("unknown token".into()))
    }
}

pub fn account(uid: &str, role: Role, enabled: bool) -> Account {
    Account {
        subject_id: uid.to_string(),
        email: format!("{uid}@example.com"),
        role,
        enabled,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct MemoryAccounts {
    accounts: Mutex<HashMap<String, Account>>,
    unavailable: bool,
    finds: AtomicUsize,
}

impl MemoryAccounts {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with(self, account: Account) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.subject_id.clone(), account);
        self
    }

    pub fn get(&self, uid: &str) -> Option<Account> {
        self.accounts.lock().unwrap().get(uid).cloned()
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    fn modify(&self, uid: &str, f: impl FnOnce(&mut Account)) -> RepoResult<()> {
        if self.unavailable {
            return Err(outage());
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts.get_mut(uid).ok_or(RepoError::NotFound)?;
        f(account);
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryAccounts {
    async fn find(&self, subject_id: &str) -> RepoResult<Option<Account>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(outage());
        }
        Ok(self.get(subject_id))
    }

    async fn list(&self) -> RepoResult<Vec<Account>> {
        if self.unavailable {
            return Err(outage());
        }
        let mut all: Vec<Account> = self.accounts.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.subject_id.cmp(&b.subject_id));
        Ok(all)
    }

    async fn update_role(&self, subject_id: &str, role: Role) -> RepoResult<()> {
        self.modify(subject_id, |a| a.role = role)
    }

    async fn update_status(&self, subject_id: &str, enabled: bool) -> RepoResult<()> {
        self.modify(subject_id, |a| a.enabled = enabled)
    }
}

#[derive(Default)]
pub struct MemoryAudit {
    entries: Mutex<Vec<NewAuditEntry>>,
    failing: bool,
    delay: Option<Duration>,
    appends: AtomicUsize,
}

impl MemoryAudit {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn entries(&self) -> Vec<NewAuditEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn appends(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuditStore for MemoryAudit {
    async fn append(&self, entry: NewAuditEntry) -> RepoResult<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(outage());
        }
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn list(&self) -> RepoResult<Vec<AuditLogRow>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let rows = self
            .entries()
            .into_iter()
            .rev()
            .map(|e| AuditLogRow {
                id: Uuid::new_v4(),
                actor_uid: e.actor_uid,
                action: e.action,
                entity: e.entity,
                entity_id: e.entity_id,
                created_at: Utc::now(),
            })
            .collect();
        Ok(rows)
    }
}

/// Support tickets and their message threads.
#[derive(Default)]
pub struct MemorySupportMessages {
    threads: Mutex<HashMap<Uuid, Vec<SupportMessage>>>,
}

impl MemorySupportMessages {
    /// Register an existing support ticket with an empty thread.
    pub fn with_ticket(self, support_id: Uuid) -> Self {
        self.threads.lock().unwrap().insert(support_id, Vec::new());
        self
    }

    pub fn thread(&self, support_id: Uuid) -> Vec<SupportMessage> {
        self.threads
            .lock()
            .unwrap()
            .get(&support_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SupportMessageStore for MemorySupportMessages {
    async fn list(&self, support_id: Uuid) -> RepoResult<Vec<SupportMessage>> {
        self.threads
            .lock()
            .unwrap()
            .get(&support_id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn create(&self, new: NewSupportMessage) -> RepoResult<SupportMessage> {
        let mut threads = self.threads.lock().unwrap();
        let thread = threads.get_mut(&new.support_id).ok_or(RepoError::NotFound)?;

        let message = SupportMessage {
            id: Uuid::new_v4(),
            support_id: new.support_id,
            sender_type: new.sender_type,
            sender_uid: new.sender_uid,
            message: new.message,
            created_at: Utc::now(),
        };
        thread.push(message.clone());
        Ok(message)
    }
}

pub fn test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: "postgres://test@localhost/unused".into(),
        database_max_connections: 1,
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        identity_provider: IdentityProviderConfig::Introspection {
            endpoint: "http://127.0.0.1:9/introspect".parse().unwrap(),
            client_id: None,
            client_secret: None,
        },
        upstream_timeout: UPSTREAM_TIMEOUT,
        request_timeout: Duration::from_secs(5),
        body_limit_bytes: 64 * 1024,
    }
}

/// Shared state wired to in-memory fakes, with handles kept for assertions.
///
/// The pool is lazy and points nowhere: only routes backed by `db` touch it.
pub struct TestApp {
    pub state: AppState,
    pub provider: Arc<StaticProvider>,
    pub accounts: Arc<MemoryAccounts>,
    pub messages: Arc<MemorySupportMessages>,
    pub audit: Arc<MemoryAudit>,
}

impl TestApp {
    pub fn new(provider: StaticProvider, accounts: MemoryAccounts, audit: MemoryAudit) -> Self {
        let provider = Arc::new(provider);
        let accounts = Arc::new(accounts);
        let audit = Arc::new(audit);
        let messages = Arc::new(MemorySupportMessages::default());

        let db = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(UPSTREAM_TIMEOUT)
            .connect_lazy(&test_config().database_url)
            .unwrap();

        let state = AppState {
            db,
            verifier: CredentialVerifier::new(provider.clone(), UPSTREAM_TIMEOUT),
            resolver: RoleResolver::new(accounts.clone(), UPSTREAM_TIMEOUT),
            accounts: accounts.clone(),
            messages: messages.clone(),
            audit: AuditLogger::new(audit.clone(), UPSTREAM_TIMEOUT),
        };

        Self {
            state,
            provider,
            accounts,
            messages,
            audit,
        }
    }

    /// Swap in a message store seeded with tickets.
    pub fn with_messages(mut self, messages: MemorySupportMessages) -> Self {
        let messages = Arc::new(messages);
        self.state.messages = messages.clone();
        self.messages = messages;
        self
    }

    pub fn router(&self) -> Router {
        crate::app::build_router(self.state.clone(), &test_config())
    }
}

pub fn test_state() -> TestApp {
    TestApp::new(
        StaticProvider::default(),
        MemoryAccounts::default(),
        MemoryAudit::default(),
    )
}
