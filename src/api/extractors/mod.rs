pub mod auth_ctx;
pub mod json;
pub mod path_id;

pub use auth_ctx::{Identity, IdentityCtx};
pub use json::AppJson;
