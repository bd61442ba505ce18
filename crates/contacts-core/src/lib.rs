//! # contacts-core
//!
//! Core crate for the contacts API. Contains configuration schemas,
//! pagination types, the traits implemented by the mail and storage
//! crates, and the unified error system.
//!
//! This crate has **no** internal dependencies on other contacts crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
