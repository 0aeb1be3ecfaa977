pub mod audit_logs;
pub mod categories;
pub mod health;
pub mod inbox;
pub mod me;
pub mod products;
pub mod protected;
pub mod stats;
pub mod support_messages;
pub mod users;
