//! Traits defined in `contacts-core` and implemented by other crates.

pub mod mail;
pub mod storage;

pub use mail::EmailSender;
pub use storage::AvatarStorage;
