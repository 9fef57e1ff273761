//! Core types and trait definitions for the tally statistics pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The ingest and storage crates depend on it; it depends on nothing
//! heavier than serde.

pub mod clean;
pub mod error;
pub mod name;
pub mod record;
pub mod store;

pub use error::{Error, Result};
