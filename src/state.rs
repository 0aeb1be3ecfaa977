/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: 一覧系 repo 用の PgPool
 *   - verifier / resolver: access pipeline の stage が使う
 *   - accounts / messages / audit: trait object 経由 (テストでは in-memory に差し替え)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::repos::support_message_repo::SupportMessageStore;
use crate::repos::user_repo::AccountStore;
use crate::services::audit::AuditLogger;
use crate::services::auth::{CredentialVerifier, RoleResolver};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub verifier: CredentialVerifier,
    pub resolver: RoleResolver,
    pub accounts: Arc<dyn AccountStore>,
    pub messages: Arc<dyn SupportMessageStore>,
    pub audit: AuditLogger,
}
