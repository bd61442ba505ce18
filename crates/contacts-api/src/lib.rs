//! # contacts-api
//!
//! HTTP API layer for the contacts service built on Axum.
//!
//! Provides the REST endpoints, middleware (rate limiting, CORS, logging),
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
