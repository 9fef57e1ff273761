//! Shared cleaning primitives used by both ingest paths.

use crate::error::{Error, Result};

/// Parse a separator-formatted count cell (`"1,326,527"` → `1326527`).
///
/// Thousands-separator commas and surrounding whitespace are stripped before
/// integer conversion. Anything else is an [`Error::InvalidCount`] — a cell
/// that stops parsing means the source layout changed, and silently zeroing
/// it would corrupt the table.
pub fn parse_count(raw: &str) -> Result<i64> {
  let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
  cleaned
    .parse::<i64>()
    .map_err(|_| Error::InvalidCount { value: raw.to_string() })
}

/// Parse a signed delta field from the statistics API.
///
/// An absent value means "no change reported" and maps to 0. A leading `+`
/// is stripped before interpretation; negative corrections (`"-10"`) pass
/// through as-is.
pub fn parse_delta(raw: Option<&str>) -> Result<i64> {
  let Some(raw) = raw else {
    return Ok(0);
  };
  let trimmed = raw.trim();
  let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
  unsigned
    .parse::<i64>()
    .map_err(|_| Error::InvalidCount { value: raw.to_string() })
}

/// Remove `[..]` footnote segments (`"China[4]"` → `"China"`) and trim.
/// Greedy within each bracket pair, no nesting.
pub fn strip_footnote(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut in_bracket = false;
  for ch in s.chars() {
    match ch {
      '[' => in_bracket = true,
      ']' => in_bracket = false,
      _ if !in_bracket => out.push(ch),
      _ => {}
    }
  }
  out.trim().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_count_strips_separators() {
    assert_eq!(parse_count("1,326,527").unwrap(), 1_326_527);
    assert_eq!(parse_count(" 83,019,200 ").unwrap(), 83_019_200);
    assert_eq!(parse_count("801").unwrap(), 801);
  }

  #[test]
  fn parse_count_rejects_non_numeric() {
    assert!(parse_count("N/A").is_err());
    assert!(parse_count("").is_err());
  }

  #[test]
  fn parse_delta_strips_plus_prefix() {
    assert_eq!(parse_delta(Some("+1234")).unwrap(), 1234);
    assert_eq!(parse_delta(Some("42")).unwrap(), 42);
    assert_eq!(parse_delta(Some("-10")).unwrap(), -10);
  }

  #[test]
  fn parse_delta_absent_is_zero() {
    assert_eq!(parse_delta(None).unwrap(), 0);
  }

  #[test]
  fn parse_delta_rejects_garbage() {
    assert!(parse_delta(Some("+abc")).is_err());
  }

  #[test]
  fn strip_footnote_removes_bracket_markers() {
    assert_eq!(strip_footnote("China[4]"), "China");
    assert_eq!(strip_footnote("Country (or dependent territory)[note 1]"),
               "Country (or dependent territory)");
    assert_eq!(strip_footnote("France"), "France");
  }
}
