//! Domain records — the cleaned rows produced by the two ingest paths.
//!
//! Both record kinds are keyed by the country-name string. The two sources
//! spell a handful of names differently; [`crate::name::canonical_country`]
//! reconciles the known mismatches at clean time so that reads can join by
//! exact string equality.

use serde::{Deserialize, Serialize};

// ─── Case record ─────────────────────────────────────────────────────────────

/// One country's case/death counts from a single statistics pull.
///
/// All counts are normalized at clean time: absent values become 0 and a
/// leading `+` on delta fields is stripped. Rows live only until the next
/// refresh replaces the table wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
  pub country:      String,
  pub new_cases:    i64,
  pub active_cases: i64,
  pub new_deaths:   i64,
  pub total_cases:  i64,
}

// ─── Population record ───────────────────────────────────────────────────────

/// One country's row from the UN population table.
///
/// Populations are separator-stripped integers; `change` keeps the source
/// cell verbatim, unit suffix included (e.g. `"+1.03%"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
  pub country:            String,
  pub continental_region: String,
  pub statistical_region: String,
  pub population_2018:    i64,
  pub population_2019:    i64,
  pub change:             String,
}

// ─── Overview ────────────────────────────────────────────────────────────────

/// A case record joined with its population row, when the name join finds
/// one. Never stored — always composed on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryOverview {
  pub cases:      CaseRecord,
  pub population: Option<PopulationRecord>,
}

impl CountryOverview {
  /// Share of the 2019 population recorded as total cases, as a percentage
  /// rounded to four decimal places. `None` when no population row matched
  /// or the population is not positive.
  pub fn percent_affected(&self) -> Option<f64> {
    let population = self.population.as_ref()?;
    percent_affected(self.cases.total_cases, population.population_2019)
  }
}

/// `(total_cases / population) * 100`, rounded to four decimal places.
/// Undefined for non-positive populations.
pub fn percent_affected(total_cases: i64, population: i64) -> Option<f64> {
  if population <= 0 {
    return None;
  }
  let raw = (total_cases as f64 / population as f64) * 100.0;
  Some((raw * 10_000.0).round() / 10_000.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn percent_affected_rounds_to_four_places() {
    // 1_500_000 / 328_239_523 * 100 = 0.45698…
    assert_eq!(percent_affected(1_500_000, 328_239_523), Some(0.457));
    assert_eq!(percent_affected(1, 3), Some(33.3333));
  }

  #[test]
  fn percent_affected_undefined_for_empty_population() {
    assert_eq!(percent_affected(100, 0), None);
    assert_eq!(percent_affected(100, -5), None);
  }
}
