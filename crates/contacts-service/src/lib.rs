//! # contacts-service
//!
//! Business logic service layer for the contacts API. Each service
//! orchestrates stores, token handling, mail, and avatar storage to
//! implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time as `Arc` references to trait objects, so the same
//! code runs against PostgreSQL in production and in-memory stores in tests.

pub mod auth;
pub mod contact;
pub mod context;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth::{AuthService, SignupRequest};
pub use contact::ContactService;
pub use context::RequestContext;
pub use user::UserService;
