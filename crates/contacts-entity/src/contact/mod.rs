//! Contact domain entities.

pub mod birthday;
pub mod filter;
pub mod model;

pub use birthday::BirthdayWindow;
pub use filter::{ContactField, ContactFilter, FilterValue};
pub use model::{Contact, CreateContact, UpdateContact};
