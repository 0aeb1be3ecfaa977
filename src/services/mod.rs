/*
 * Responsibility
 * - handler から使う service 層
 *   - auth: credential 検証 / role 解決
 *   - audit: best-effort の監査ログ
 */
pub mod audit;
pub mod auth;
