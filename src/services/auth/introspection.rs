//! RFC 7662 token introspection against a remote identity provider.
//!
//! Classification:
//! - `active: false` or no `sub` → the token is rejected
//! - transport errors, timeouts, non-2xx, unparsable bodies → provider unavailable
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::services::auth::provider::{IdentityProvider, ProviderError, SubjectId};

#[derive(Debug, Deserialize)]
struct IntrospectionResponse {
    active: bool,
    #[serde(default)]
    sub: Option<String>,
}

#[derive(Clone, Debug)]
pub struct IntrospectionProvider {
    http: reqwest::Client,
    endpoint: Url,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl IntrospectionProvider {
    pub fn new(
        endpoint: Url,
        client_id: Option<String>,
        client_secret: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            client_id,
            client_secret,
        })
    }
}

fn classify(body: IntrospectionResponse) -> Result<SubjectId, ProviderError> {
    if !body.active {
        return Err(ProviderError::Rejected("token is not active".into()));
    }

    body.sub
        .and_then(SubjectId::new)
        .ok_or_else(|| ProviderError::Rejected("introspection response has no 'sub'".into()))
}

#[async_trait]
impl IdentityProvider for IntrospectionProvider {
    fn name(&self) -> &'static str {
        "introspection"
    }

    async fn verify_token(&self, token: &str) -> Result<SubjectId, ProviderError> {
        let mut req = self
            .http
            .post(self.endpoint.clone())
            .form(&[("token", token), ("token_type_hint", "access_token")]);

        if let Some(client_id) = &self.client_id {
            req = req.basic_auth(client_id, self.client_secret.as_deref());
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // The endpoint authenticates *us*, not the caller; any non-2xx is a provider problem.
            return Err(ProviderError::Unavailable(format!(
                "introspection endpoint returned {status}"
            )));
        }

        let body: IntrospectionResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("unreadable response: {e}")))?;

        classify(body)
    }
}
