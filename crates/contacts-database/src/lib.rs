//! # contacts-database
//!
//! PostgreSQL connection management, the store traits the service layer
//! depends on, and their Postgres and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryContactStore, MemoryUserStore};
pub use repositories::{PgContactStore, PgUserStore};
pub use store::{ContactStore, UserStore};
