/*
 * Responsibility
 * - GET /protected (認証のみ, role 不要)
 */
use crate::api::extractors::Identity;

pub async fn protected(Identity(ctx): Identity) -> String {
    format!("Hello UID: {}", ctx.subject_id())
}
