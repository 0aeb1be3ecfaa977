pub mod audit_repo;
pub mod category_repo;
pub mod error;
pub mod inbox_repo;
pub mod product_repo;
pub mod stats_repo;
pub mod support_message_repo;
pub mod user_repo;
