//! PostgreSQL store implementations.

pub mod contact;
pub mod user;

pub use contact::PgContactStore;
pub use user::PgUserStore;
