//! HTTP request handlers, one module per route group.

pub mod auth;
pub mod contact;
pub mod health;
pub mod user;
