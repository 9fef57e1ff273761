//! Integration tests for `SqliteStore` against an in-memory database.

use tally_core::{
  record::{CaseRecord, PopulationRecord},
  store::StatsStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn case(country: &str, total: i64) -> CaseRecord {
  CaseRecord {
    country:      country.into(),
    new_cases:    10,
    active_cases: 100,
    new_deaths:   1,
    total_cases:  total,
  }
}

fn population(country: &str, pop_2019: i64) -> PopulationRecord {
  PopulationRecord {
    country:            country.into(),
    continental_region: "Europe".into(),
    statistical_region: "Western Europe".into(),
    population_2018:    pop_2019 - 50_000,
    population_2019:    pop_2019,
    change:             "+0.20%".into(),
  }
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_n_records_leaves_exactly_n_rows_sorted_by_total() {
  let s = store().await;
  s.reset_schema().await.unwrap();

  let inserted = s
    .insert_cases(vec![
      case("France", 190_000),
      case("United States", 1_988_545),
      case("Italy", 235_000),
    ])
    .await
    .unwrap();
  assert_eq!(inserted, 3);

  let all = s.cases_by_total().await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(all[0].country, "United States");
  assert_eq!(all[1].country, "Italy");
  assert_eq!(all[2].country, "France");
}

#[tokio::test]
async fn reset_schema_discards_prior_rows() {
  let s = store().await;

  s.insert_cases(vec![case("France", 1)]).await.unwrap();
  s.reset_schema().await.unwrap();

  assert!(s.cases_by_total().await.unwrap().is_empty());
  assert!(s.case_for_country("France").await.unwrap().is_none());
}

#[tokio::test]
async fn insert_population_round_trips() {
  let s = store().await;

  s.insert_population(vec![population("Germany", 83_517_045)])
    .await
    .unwrap();

  let row = s
    .population_for_country("Germany")
    .await
    .unwrap()
    .expect("row present");
  assert_eq!(row.population_2019, 83_517_045);
  assert_eq!(row.change, "+0.20%");
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn case_lookup_by_exact_name() {
  let s = store().await;
  s.insert_cases(vec![case("France", 190_000), case("Italy", 235_000)])
    .await
    .unwrap();

  let hit = s.case_for_country("Italy").await.unwrap().expect("hit");
  assert_eq!(hit.total_cases, 235_000);

  assert!(s.case_for_country("Atlantis").await.unwrap().is_none());
}

#[tokio::test]
async fn lookup_binds_parameters_for_awkward_names() {
  let s = store().await;
  s.insert_cases(vec![case("Cote d'Ivoire", 2_341)])
    .await
    .unwrap();

  let hit = s
    .case_for_country("Cote d'Ivoire")
    .await
    .unwrap()
    .expect("quoted name still matches");
  assert_eq!(hit.total_cases, 2_341);

  // A hostile lookup string is just a miss, never executed as SQL.
  let miss = s
    .case_for_country("x\"; DROP TABLE \"Cases\"; --")
    .await
    .unwrap();
  assert!(miss.is_none());
  assert_eq!(s.cases_by_total().await.unwrap().len(), 1);
}

// ─── Overview ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn overview_joins_cases_with_population_by_name() {
  let s = store().await;
  s.insert_cases(vec![case("Germany", 186_000)]).await.unwrap();
  s.insert_population(vec![population("Germany", 83_517_045)])
    .await
    .unwrap();

  let overview = s.overview("Germany").await.unwrap().expect("overview");
  assert_eq!(overview.cases.total_cases, 186_000);
  assert_eq!(
    overview.population.as_ref().map(|p| p.population_2019),
    Some(83_517_045)
  );
  // 186_000 / 83_517_045 * 100 = 0.22271…
  assert_eq!(overview.percent_affected(), Some(0.2227));
}

#[tokio::test]
async fn overview_with_no_population_row_reports_the_miss() {
  let s = store().await;
  s.insert_cases(vec![case("S Korea", 11_902)]).await.unwrap();
  s.insert_population(vec![population("South Korea", 51_225_308)])
    .await
    .unwrap();

  // The API spelling does not match the table spelling, so the join misses.
  let overview = s.overview("S Korea").await.unwrap().expect("case row exists");
  assert!(overview.population.is_none());
  assert_eq!(overview.percent_affected(), None);
}

#[tokio::test]
async fn overview_for_unknown_country_is_none() {
  let s = store().await;
  assert!(s.overview("Atlantis").await.unwrap().is_none());
}
