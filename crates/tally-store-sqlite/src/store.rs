//! [`SqliteStore`] — the SQLite implementation of [`StatsStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use tally_core::{
  record::{CaseRecord, CountryOverview, PopulationRecord},
  store::StatsStore,
};

use crate::{
  Error, Result,
  schema::{CREATE_TABLES, DROP_TABLES, PRAGMAS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tally statistics store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        conn.execute_batch(CREATE_TABLES)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

fn case_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CaseRecord> {
  Ok(CaseRecord {
    country:      row.get(0)?,
    new_cases:    row.get(1)?,
    active_cases: row.get(2)?,
    new_deaths:   row.get(3)?,
    total_cases:  row.get(4)?,
  })
}

fn population_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<PopulationRecord> {
  Ok(PopulationRecord {
    country:            row.get(0)?,
    continental_region: row.get(1)?,
    statistical_region: row.get(2)?,
    population_2018:    row.get(3)?,
    population_2019:    row.get(4)?,
    change:             row.get(5)?,
  })
}

// ─── StatsStore impl ─────────────────────────────────────────────────────────

impl StatsStore for SqliteStore {
  type Error = Error;

  // ── Writes ──────────────────────────────────────────────────────────────

  async fn reset_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP_TABLES)?;
        conn.execute_batch(CREATE_TABLES)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_cases(&self, records: Vec<CaseRecord>) -> Result<usize> {
    let count = records.len();

    self
      .conn
      .call(move |conn| {
        // One transaction per batch: a mid-batch failure must not leave a
        // partially loaded table.
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            r#"INSERT INTO "Cases"
                 ("Country", "NewCases", "ActiveCases", "NewDeaths", "TotalCases")
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
          )?;
          for record in &records {
            stmt.execute(rusqlite::params![
              record.country,
              record.new_cases,
              record.active_cases,
              record.new_deaths,
              record.total_cases,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(count)
  }

  async fn insert_population(
    &self,
    records: Vec<PopulationRecord>,
  ) -> Result<usize> {
    let count = records.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            r#"INSERT INTO "Population"
                 ("Country", "UNContinentalRegion", "UNStatisticalRegion",
                  "2018population", "2019population", "PopulationChange")
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
          )?;
          for record in &records {
            stmt.execute(rusqlite::params![
              record.country,
              record.continental_region,
              record.statistical_region,
              record.population_2018,
              record.population_2019,
              record.change,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(count)
  }

  // ── Reads ───────────────────────────────────────────────────────────────

  async fn case_for_country(&self, country: &str) -> Result<Option<CaseRecord>> {
    let country = country.to_owned();

    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              r#"SELECT "Country", "NewCases", "ActiveCases", "NewDeaths", "TotalCases"
                 FROM "Cases" WHERE "Country" = ?1"#,
              rusqlite::params![country],
              case_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(record)
  }

  async fn population_for_country(
    &self,
    country: &str,
  ) -> Result<Option<PopulationRecord>> {
    let country = country.to_owned();

    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              r#"SELECT "Country", "UNContinentalRegion", "UNStatisticalRegion",
                        "2018population", "2019population", "PopulationChange"
                 FROM "Population" WHERE "Country" = ?1"#,
              rusqlite::params![country],
              population_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(record)
  }

  async fn cases_by_total(&self) -> Result<Vec<CaseRecord>> {
    let records = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          r#"SELECT "Country", "NewCases", "ActiveCases", "NewDeaths", "TotalCases"
             FROM "Cases" ORDER BY "TotalCases" DESC"#,
        )?;
        let rows = stmt
          .query_map([], case_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(records)
  }

  async fn overview(&self, country: &str) -> Result<Option<CountryOverview>> {
    let cases = match self.case_for_country(country).await? {
      Some(cases) => cases,
      None => return Ok(None),
    };

    // The name join is exact; a miss is a legitimate outcome, not an error.
    let population = self.population_for_country(country).await?;

    Ok(Some(CountryOverview { cases, population }))
  }
}
