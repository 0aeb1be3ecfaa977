use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::services::auth::provider::{IdentityProvider, ProviderError, SubjectId};

// Errors returned by ID-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid verification key for {algorithm:?}: {source}")]
    InvalidKey {
        algorithm: Algorithm,
        source: jsonwebtoken::errors::Error,
    },
    #[error("unsupported algorithm {0:?}")]
    UnsupportedAlgorithm(Algorithm),
}

/// ID-token claims we rely on.
///
/// NOTE:
/// - `aud` can be either string or array; jsonwebtoken validates it via `Validation::set_audience`.
/// - `exp` / `nbf` are checked by `Validation` from the raw payload and are not kept here.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    pub sub: String,
}

/// Local ID-token verifier (signature + iss/aud/exp/nbf).
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtIdentityProvider")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtIdentityProvider {
    pub fn new(
        key_material: &str,
        algorithm: Algorithm,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, KeyError> {
        let decoding_key = match algorithm {
            Algorithm::RS256 => DecodingKey::from_rsa_pem(key_material.as_bytes()),
            Algorithm::ES256 => DecodingKey::from_ec_pem(key_material.as_bytes()),
            Algorithm::EdDSA => DecodingKey::from_ed_pem(key_material.as_bytes()),
            Algorithm::HS256 => Ok(DecodingKey::from_secret(key_material.as_bytes())),
            other => return Err(KeyError::UnsupportedAlgorithm(other)),
        }
        .map_err(|source| KeyError::InvalidKey { algorithm, source })?;

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks signature, `exp`, `nbf`, `iss` and `aud`.
    /// This method additionally requires `iss` and `sub` to be non-empty.
    pub fn verify_strict(&self, token: &str) -> Result<IdTokenClaims, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<IdTokenClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.iss.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }

        Ok(claims)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    fn name(&self) -> &'static str {
        "jwt"
    }

    async fn verify_token(&self, token: &str) -> Result<SubjectId, ProviderError> {
        let claims = self
            .verify_strict(token)
            .map_err(|e| ProviderError::Rejected(e.to_string()))?;

        SubjectId::new(claims.sub).ok_or_else(|| ProviderError::Rejected("empty 'sub'".into()))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test-secret-with-enough-entropy-0123456789";
    const ISSUER: &str = "https://issuer.example";
    const AUDIENCE: &str = "premier-admin";

    fn provider() -> JwtIdentityProvider {
        JwtIdentityProvider::new(SECRET, Algorithm::HS256, ISSUER, AUDIENCE, 0).unwrap()
    }

    fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    fn sign(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_token_yields_subject() {
        let token = sign(json!({
            "iss": ISSUER, "aud": AUDIENCE, "sub": "u1", "exp": now() + 600
        }));

        let subject = provider().verify_token(&token).await.unwrap();
        assert_eq!(subject.as_str(), "u1");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token = sign(json!({
            "iss": ISSUER, "aud": AUDIENCE, "sub": "u1", "exp": now() - 600
        }));

        let err = provider().verify_token(&token).await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected(_)));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let token = sign(json!({
            "iss": ISSUER, "aud": "someone-else", "sub": "u1", "exp": now() + 600
        }));

        let err = provider().verify_token(&token).await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected(_)));
    }

    #[tokio::test]
    async fn blank_subject_is_rejected() {
        let token = sign(json!({
            "iss": ISSUER, "aud": AUDIENCE, "sub": "  ", "exp": now() + 600
        }));

        let err = provider().verify_token(&token).await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected(_)));
    }

    #[tokio::test]
    async fn garbage_is_rejected_not_unavailable() {
        let err = provider().verify_token("abc.def.ghi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected(_)));
    }

    #[test]
    fn invalid_pem_fails_at_construction() {
        let err =
            JwtIdentityProvider::new("not a pem", Algorithm::RS256, ISSUER, AUDIENCE, 0).unwrap_err();
        assert!(matches!(err, KeyError::InvalidKey { .. }));
    }
}
