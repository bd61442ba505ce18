//! # contacts-entity
//!
//! Domain entity models for the contacts API. Every struct in this crate
//! represents a database table row or a domain value object. Row models
//! derive `sqlx::FromRow` in addition to the serde traits.

pub mod contact;
pub mod user;
