//! Account lifecycle: signup, email confirmation, login, token refresh.

pub mod gravatar;
pub mod service;

pub use service::{AuthService, SignupRequest};
