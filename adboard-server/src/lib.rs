//! adboard-server: classified-ads HTTP service
//!
//! Ads filed under rubrics, tagged through a weighted many-to-many link,
//! owned by users with one profile each. The domain rules live in two
//! layers that are deliberately not identical: field validators that run
//! only in an explicit validation pass, and the schema constraints that
//! apply to every write.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::ModerationConfig;
pub use http::{run_server, AppState, ServerConfig};

/// Crate-wide result alias for database-backed operations
pub type Result<T> = std::result::Result<T, db::repos::DbError>;
