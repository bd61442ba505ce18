//! Avatar storage backends.

#[cfg(feature = "local")]
pub mod local;

#[cfg(feature = "local")]
pub use local::LocalAvatarStorage;
