//! Address-book use cases.

pub mod service;

pub use service::ContactService;
