//! Credential Verifier: `Authorization` header → verified subject.
//!
//! The header shape is checked locally; anything that is not exactly
//! `Bearer <token>` is rejected before the identity provider is called.
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::services::auth::provider::{IdentityProvider, ProviderError, SubjectId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("authorization header required")]
    MissingCredential,
    #[error("invalid authorization format")]
    MalformedCredential,
    #[error("invalid or expired token")]
    InvalidOrExpiredCredential,
    #[error("identity provider unavailable")]
    ProviderUnavailable,
}

impl CredentialError {
    pub fn code(&self) -> &'static str {
        match self {
            CredentialError::MissingCredential => "MISSING_CREDENTIAL",
            CredentialError::MalformedCredential => "MALFORMED_CREDENTIAL",
            CredentialError::InvalidOrExpiredCredential => "INVALID_OR_EXPIRED_CREDENTIAL",
            CredentialError::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
        }
    }
}

/// Split `Bearer <token>` into its token.
///
/// Exactly two space-separated parts, the first exactly `Bearer`, the second non-empty.
pub fn parse_bearer(raw: &str) -> Result<&str, CredentialError> {
    let mut parts = raw.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(CredentialError::MalformedCredential),
    }
}

#[derive(Clone)]
pub struct CredentialVerifier {
    provider: Arc<dyn IdentityProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("provider", &self.provider.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CredentialVerifier {
    pub fn new(provider: Arc<dyn IdentityProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Verify the raw header value. Makes at most one provider call.
    pub async fn verify(&self, header: Option<&HeaderValue>) -> Result<SubjectId, CredentialError> {
        let header = header.ok_or(CredentialError::MissingCredential)?;
        let raw = header
            .to_str()
            .map_err(|_| CredentialError::MalformedCredential)?;
        let token = parse_bearer(raw)?;

        let verdict = tokio::time::timeout(self.timeout, self.provider.verify_token(token))
            .await
            .unwrap_or_else(|_| Err(ProviderError::Unavailable("deadline exceeded".into())));

        match verdict {
            Ok(subject) => Ok(subject),
            Err(ProviderError::Rejected(reason)) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    failure = "authentication",
                    %reason,
                    "token rejected by identity provider"
                );
                Err(CredentialError::InvalidOrExpiredCredential)
            }
            Err(ProviderError::Unavailable(reason)) => {
                tracing::error!(
                    provider = self.provider.name(),
                    failure = "dependency",
                    %reason,
                    "identity provider unavailable"
                );
                Err(CredentialError::ProviderUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticProvider;

    fn verifier(provider: Arc<StaticProvider>) -> CredentialVerifier {
        CredentialVerifier::new(provider, Duration::from_millis(200))
    }

    #[test]
    fn bearer_parsing_requires_exact_two_part_form() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
        assert_eq!(
            parse_bearer("Token abc"),
            Err(CredentialError::MalformedCredential)
        );
        assert_eq!(
            parse_bearer("bearer abc"),
            Err(CredentialError::MalformedCredential)
        );
        assert_eq!(
            parse_bearer("Bearer"),
            Err(CredentialError::MalformedCredential)
        );
        assert_eq!(
            parse_bearer("Bearer "),
            Err(CredentialError::MalformedCredential)
        );
        assert_eq!(
            parse_bearer("Bearer  abc"),
            Err(CredentialError::MalformedCredential)
        );
        assert_eq!(
            parse_bearer("Bearer abc extra"),
            Err(CredentialError::MalformedCredential)
        );
    }

    #[tokio::test]
    async fn missing_header_never_calls_provider() {
        let provider = Arc::new(StaticProvider::default());
        let err = verifier(provider.clone()).verify(None).await.unwrap_err();

        assert_eq!(err, CredentialError::MissingCredential);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn wrong_scheme_never_calls_provider() {
        let provider = Arc::new(StaticProvider::default().with_token("abc", "u1"));
        let header = HeaderValue::from_static("Token abc");
        let err = verifier(provider.clone())
            .verify(Some(&header))
            .await
            .unwrap_err();

        assert_eq!(err, CredentialError::MalformedCredential);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn confirmed_token_yields_subject_with_one_call() {
        let provider = Arc::new(StaticProvider::default().with_token("abc.def.ghi", "u1"));
        let header = HeaderValue::from_static("Bearer abc.def.ghi");
        let subject = verifier(provider.clone())
            .verify(Some(&header))
            .await
            .unwrap();

        assert_eq!(subject.as_str(), "u1");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn reverification_is_idempotent() {
        let provider = Arc::new(StaticProvider::default().with_token("good", "u1"));
        let v = verifier(provider.clone());

        let good = HeaderValue::from_static("Bearer good");
        let first = v.verify(Some(&good)).await;
        let second = v.verify(Some(&good)).await;
        assert_eq!(first, second);

        let bad = HeaderValue::from_static("Bearer bad");
        let first = v.verify(Some(&bad)).await;
        let second = v.verify(Some(&bad)).await;
        assert_eq!(first, Err(CredentialError::InvalidOrExpiredCredential));
        assert_eq!(first, second);

        assert_eq!(provider.calls(), 4);
    }

    #[tokio::test]
    async fn unreachable_provider_is_not_an_auth_failure() {
        let provider = Arc::new(StaticProvider::unavailable());
        let header = HeaderValue::from_static("Bearer abc");
        let err = verifier(provider).verify(Some(&header)).await.unwrap_err();

        assert_eq!(err, CredentialError::ProviderUnavailable);
    }

    #[tokio::test]
    async fn slow_provider_hits_the_deadline() {
        let provider = Arc::new(
            StaticProvider::default()
                .with_token("abc", "u1")
                .with_delay(Duration::from_secs(5)),
        );
        let header = HeaderValue::from_static("Bearer abc");
        let err = verifier(provider).verify(Some(&header)).await.unwrap_err();

        assert_eq!(err, CredentialError::ProviderUnavailable);
    }
}
