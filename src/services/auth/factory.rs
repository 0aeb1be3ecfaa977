/// Factory: build the identity provider and verifier from application `Config`.
use std::sync::Arc;

use thiserror::Error;

use crate::config::{Config, IdentityProviderConfig};
use crate::services::auth::{
    CredentialVerifier, IdentityProvider, IntrospectionProvider, JwtIdentityProvider,
    access_jwt::KeyError,
};

#[derive(Debug, Error)]
pub enum ProviderBuildError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

pub fn build_identity_provider(
    config: &Config,
) -> Result<Arc<dyn IdentityProvider>, ProviderBuildError> {
    let provider: Arc<dyn IdentityProvider> = match &config.identity_provider {
        IdentityProviderConfig::Jwt {
            issuer,
            audience,
            algorithm,
            key_material,
            leeway_seconds,
        } => Arc::new(JwtIdentityProvider::new(
            key_material,
            *algorithm,
            issuer,
            audience,
            *leeway_seconds,
        )?),
        IdentityProviderConfig::Introspection {
            endpoint,
            client_id,
            client_secret,
        } => Arc::new(IntrospectionProvider::new(
            endpoint.clone(),
            client_id.clone(),
            client_secret.clone(),
            config.upstream_timeout,
        )?),
    };

    tracing::info!(provider = provider.name(), "identity provider configured");
    Ok(provider)
}

pub fn build_credential_verifier(config: &Config) -> Result<CredentialVerifier, ProviderBuildError> {
    let provider = build_identity_provider(config)?;
    Ok(CredentialVerifier::new(provider, config.upstream_timeout))
}
