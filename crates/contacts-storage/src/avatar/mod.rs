//! Avatar image normalization.

pub mod processor;

pub use processor::{AvatarProcessor, normalize};
