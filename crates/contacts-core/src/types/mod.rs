//! Core type definitions shared across the contacts workspace.

pub mod pagination;

pub use pagination::PageRequest;
