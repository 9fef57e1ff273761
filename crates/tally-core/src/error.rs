//! Error types for `tally-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A numeric cell or field that does not parse as an integer after
  /// separator/sign normalization.
  #[error("not a count: {value:?}")]
  InvalidCount { value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
