//! HTTP middleware and tower layers.

pub mod cors;
pub mod logging;
pub mod rate_limit;
