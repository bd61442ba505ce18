//! # contacts-storage
//!
//! Avatar handling for the contacts API: decoding and square-cropping
//! uploaded images, and the local filesystem backend for
//! [`AvatarStorage`](contacts_core::traits::AvatarStorage).

pub mod avatar;
pub mod providers;

pub use avatar::{AvatarProcessor, normalize};
#[cfg(feature = "local")]
pub use providers::LocalAvatarStorage;
