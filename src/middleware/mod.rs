/*
 * Responsibility
 * - middleware の公開インターフェース
 *   - http: request id / trace / body limit / timeout
 *   - cors: ブラウザ向け CORS policy
 *   - auth: credential 検証 → role 解決 → guard の pipeline
 */
pub mod auth;
pub mod cors;
pub mod http;
