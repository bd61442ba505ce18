//! # contacts-auth
//!
//! Token and credential primitives for the contacts API.
//!
//! ## Modules
//!
//! - `jwt`: access, refresh, and email-confirmation token issuance and validation
//! - `password`: Argon2id password hashing and strength policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenScope};
pub use password::{PasswordHasher, PasswordValidator};
