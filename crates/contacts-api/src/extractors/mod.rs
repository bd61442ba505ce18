//! Custom Axum extractors.

pub mod auth;
pub mod client_ip;
pub mod pagination;
pub mod rejection;
pub mod validated_json;

pub use auth::{AuthUser, BearerToken};
pub use client_ip::ClientIp;
pub use pagination::{BirthdayQuery, ContactListQuery};
pub use rejection::{ValidForm, ValidPath, ValidQuery};
pub use validated_json::ValidatedJson;
