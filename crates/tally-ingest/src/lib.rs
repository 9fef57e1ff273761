//! Ingest layer for tally — fetching, source-specific cleaning, and the
//! fetch cache.
//!
//! Two sources feed the pipeline: the UN population table scraped from a
//! Wikipedia page ([`wiki`]) and a COVID statistics API ([`api`]). Raw
//! responses are mirrored in a durable JSON file ([`cache::FetchCache`])
//! keyed by request URL, so repeat runs skip the network entirely.

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
mod html;
pub mod wiki;

pub use cache::FetchCache;
pub use client::SourceClient;
pub use error::{Error, Result};
