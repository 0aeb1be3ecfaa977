/*
 * Responsibility
 * - request/response DTO
 * - validate() は「必須項目がある」「閉じた集合の値」だけを見る
 */
pub mod categories;
pub mod inbox;
pub mod products;
pub mod support_messages;
pub mod users;

use serde::Serialize;

/// A rejected field, with its stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub code: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(code: &'static str, message: &'static str) -> Self {
        Self { code, message }
    }
}

/// Body for DELETE responses.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: String,
    pub message: String,
}
