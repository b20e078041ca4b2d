//! Shared test utilities used across topogen crates.

pub mod graphml;
pub mod property;
pub mod tracing;
