//! Database layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool with a small explicit cap
//! - List operations use window functions for totals - no N+1 queries
//! - Rely on DB constraints, classify violations - no check-then-insert
//! - Field validators never run here; see the models layer

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
