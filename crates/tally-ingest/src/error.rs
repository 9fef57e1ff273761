//! Error types for `tally-ingest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tally_core::Error),

  #[error("HTTP request error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unexpected status {status} from {url}")]
  Status { url: String, status: u16 },

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// No `<table>` with the expected class marker in the scraped page.
  #[error("population table not found in page")]
  TableNotFound,

  /// The table was found but its headings no longer look like the
  /// population table.
  #[error("population table shape changed: {0}")]
  TableShape(String),

  /// A data row with fewer cells than the six the layout guarantees.
  #[error("population row has {found} cells, expected 6")]
  RowShape { found: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
