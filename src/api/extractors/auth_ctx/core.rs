use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::CredentialError;
use crate::state::AppState;

use super::IdentityCtx;

/// Handler で IdentityCtx を受け取るための extractor
/// middleware が IdentityCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（認証がかかってない・ミドルウェア未設定）
pub struct Identity(pub IdentityCtx);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityCtx>()
            .cloned()
            .map(Identity)
            .ok_or(AppError::Credential(CredentialError::MissingCredential))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    use super::*;
    use crate::services::auth::SubjectId;
    use crate::testing::test_state;

    #[tokio::test]
    async fn missing_context_is_401() {
        let (mut parts, _) = Request::new(()).into_parts();
        let state = test_state().state;

        let rejection = Identity::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn context_from_extensions_is_returned() {
        let (mut parts, _) = Request::new(()).into_parts();
        parts
            .extensions
            .insert(IdentityCtx::authenticated(SubjectId::new("u1").unwrap()));
        let state = test_state().state;

        let Identity(ctx) = Identity::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(ctx.subject_id().as_str(), "u1");
    }
}
