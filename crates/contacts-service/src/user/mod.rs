//! Profile and administrative user operations.

pub mod service;

pub use service::UserService;
