//! Refresh orchestration — fetch (through the cache), clean, and load both
//! sources into the store.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tally_core::store::StatsStore;
use tally_ingest::{FetchCache, SourceClient, api, wiki};
use tally_store_sqlite::SqliteStore;
use tracing::info;

/// Endpoints and credentials for one refresh.
pub struct Sources {
  pub wiki_url: String,
  pub api_url:  String,
  pub api_key:  String,
  /// Optional country scope forwarded to the statistics API.
  pub country:  Option<String>,
}

/// Row counts loaded per table.
pub struct RefreshOutcome {
  pub population_rows: usize,
  pub case_rows:       usize,
}

/// Run the full pipeline: fetch → clean → reset schema → insert.
///
/// Each request is keyed by its URL in the cache; a hit skips the network
/// entirely. The database reset happens only after both sources have been
/// fetched and cleaned, so a failed fetch leaves the previous load intact.
pub async fn run(
  store: &SqliteStore,
  client: &SourceClient,
  cache: &mut FetchCache,
  sources: &Sources,
) -> Result<RefreshOutcome> {
  // ── Population table ────────────────────────────────────────────────────
  let page = match cache.lookup(&sources.wiki_url) {
    Some(value) => {
      info!(url = %sources.wiki_url, "using cache");
      value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("cached payload for {} is not page text", sources.wiki_url))?
    }
    None => {
      info!(url = %sources.wiki_url, "fetching");
      let body = client
        .fetch_page(&sources.wiki_url)
        .await
        .context("fetching population table")?;
      cache.store(sources.wiki_url.as_str(), Value::String(body.clone()))?;
      body
    }
  };
  let population =
    wiki::parse_population(&page).context("cleaning population table")?;

  // ── Statistics API ──────────────────────────────────────────────────────
  // The cache key carries the country scope: differently-scoped responses
  // must not shadow each other.
  let stats_key = match &sources.country {
    Some(country) => format!("{}?country={country}", sources.api_url),
    None => sources.api_url.clone(),
  };
  let payload = match cache.lookup(&stats_key) {
    Some(value) => {
      info!(url = %stats_key, "using cache");
      value.clone()
    }
    None => {
      info!(url = %stats_key, "fetching");
      let value = client
        .fetch_stats(&sources.api_url, &sources.api_key, sources.country.as_deref())
        .await
        .context("fetching case statistics")?;
      cache.store(stats_key.as_str(), value.clone())?;
      value
    }
  };
  let cases = api::clean_cases(&payload).context("cleaning case statistics")?;

  // ── Load ────────────────────────────────────────────────────────────────
  store.reset_schema().await.context("resetting schema")?;
  let population_rows = store
    .insert_population(population)
    .await
    .context("inserting population rows")?;
  let case_rows = store
    .insert_cases(cases)
    .await
    .context("inserting case rows")?;

  Ok(RefreshOutcome { population_rows, case_rows })
}
