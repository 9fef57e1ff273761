//! The `StatsStore` trait.
//!
//! Implemented by storage backends (e.g. `tally-store-sqlite`). The CLI and
//! tests depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{CaseRecord, CountryOverview, PopulationRecord};

/// Abstraction over a tally statistics store.
///
/// The store holds exactly one refresh worth of data: `reset_schema`
/// followed by the two batch inserts replaces the previous contents
/// wholesale. Historical retention is a non-goal.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait StatsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Drop and recreate both tables. Destructive: prior rows are discarded.
  fn reset_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert one row per case record in a single transaction. A mid-batch
  /// failure rolls the whole batch back. Returns the row count.
  fn insert_cases(
    &self,
    records: Vec<CaseRecord>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Insert one row per population record in a single transaction.
  /// Returns the row count.
  fn insert_population(
    &self,
    records: Vec<PopulationRecord>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Exact-name point lookup. `None` when the country is not in the table.
  fn case_for_country<'a>(
    &'a self,
    country: &'a str,
  ) -> impl Future<Output = Result<Option<CaseRecord>, Self::Error>> + Send + 'a;

  /// Exact-name point lookup against the population table.
  fn population_for_country<'a>(
    &'a self,
    country: &'a str,
  ) -> impl Future<Output = Result<Option<PopulationRecord>, Self::Error>> + Send + 'a;

  /// All case records, sorted descending by total cases.
  fn cases_by_total(
    &self,
  ) -> impl Future<Output = Result<Vec<CaseRecord>, Self::Error>> + Send + '_;

  /// Compose the two point lookups into a [`CountryOverview`].
  /// `None` when no case row exists for the name; a missing population row
  /// is `Some(overview)` with `population: None` (the name join can miss).
  fn overview<'a>(
    &'a self,
    country: &'a str,
  ) -> impl Future<Output = Result<Option<CountryOverview>, Self::Error>> + Send + 'a;
}
