//! Shared building blocks for the character API crates: logging setup,
//! runtime environment checks, Prometheus metrics and small wire types.

pub mod types;
pub mod utils;
pub mod env;
pub mod metrics;
