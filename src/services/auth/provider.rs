//! Identity-provider interface consumed by the credential verifier.
use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Stable, provider-assigned identifier of an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectId(String);

impl SubjectId {
    /// Returns `None` for a blank subject; providers must never hand one out.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-side verification failure.
///
/// - `Rejected`: the token itself is bad (signature, expiry, revocation, inactive)
/// - `Unavailable`: the provider could not answer; the caller did nothing wrong
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("token rejected: {0}")]
    Rejected(String),
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Backend name (for logging).
    fn name(&self) -> &'static str;

    /// Verify `token` and return its subject. One call per request; no caching.
    async fn verify_token(&self, token: &str) -> Result<SubjectId, ProviderError>;
}
