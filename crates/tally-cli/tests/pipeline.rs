//! End-to-end pipeline test: fixture page + fixture payload → clean →
//! store → percentage-affected query.

use serde_json::json;
use tally_core::store::StatsStore;
use tally_ingest::{api, wiki};
use tally_store_sqlite::SqliteStore;

/// Three table rows; two of the countries also appear in the case payload
/// under API spellings.
const PAGE: &str = r#"
  <table class="wikitable sortable">
    <tbody>
      <tr>
        <th>Country (or dependent territory)</th>
        <th>UN continental region[1]</th>
        <th>UN statistical region[1]</th>
        <th>Population (1 July 2018)</th>
        <th>Population (1 July 2019)</th>
        <th>Change</th>
      </tr>
      <tr>
        <td><a href="/wiki/United_States">United States</a>[b]</td>
        <td>Americas</td>
        <td>Northern America</td>
        <td>327,096,265</td>
        <td>329,064,917</td>
        <td>+0.60%</td>
      </tr>
      <tr>
        <td>France</td>
        <td>Europe</td>
        <td>Western Europe</td>
        <td>64,990,511</td>
        <td>65,129,728</td>
        <td>+0.21%</td>
      </tr>
      <tr>
        <td>Japan</td>
        <td>Asia</td>
        <td>Eastern Asia</td>
        <td>127,202,192</td>
        <td>126,860,301</td>
        <td>-0.27%</td>
      </tr>
    </tbody>
  </table>
"#;

fn payload() -> serde_json::Value {
  json!({
    "response": [
      {
        "country": "USA",
        "cases": { "new": "+24998", "active": 1_162_087, "total": 1_988_545 },
        "deaths": { "new": "+721" }
      },
      {
        "country": "France",
        "cases": { "new": "+343", "active": 91_274, "total": 190_000 },
        "deaths": { "new": null }
      },
      {
        "country": "S-Korea",
        "cases": { "new": null, "active": 1277, "total": 11_902 },
        "deaths": { "new": null }
      }
    ]
  })
}

#[tokio::test]
async fn pipeline_computes_percent_affected_for_a_shared_country() {
  let store = SqliteStore::open_in_memory().await.unwrap();

  // Clean both fixtures the same way a refresh does.
  let population = wiki::parse_population(PAGE).unwrap();
  let cases = api::clean_cases(&payload()).unwrap();

  store.reset_schema().await.unwrap();
  assert_eq!(store.insert_population(population).await.unwrap(), 3);
  assert_eq!(store.insert_cases(cases).await.unwrap(), 3);

  // The API's "USA" joined the table's "United States" via the alias.
  let overview = store
    .overview("United States")
    .await
    .unwrap()
    .expect("joined country present");

  assert_eq!(overview.cases.total_cases, 1_988_545);
  assert_eq!(overview.cases.new_cases, 24_998);
  assert_eq!(
    overview.population.as_ref().map(|p| p.population_2019),
    Some(329_064_917)
  );

  // (1_988_545 / 329_064_917) * 100 = 0.60430…, rounded to 4 places.
  assert_eq!(overview.percent_affected(), Some(0.6043));
}

#[tokio::test]
async fn pipeline_lists_countries_by_total_cases() {
  let store = SqliteStore::open_in_memory().await.unwrap();

  store
    .insert_population(wiki::parse_population(PAGE).unwrap())
    .await
    .unwrap();
  store
    .insert_cases(api::clean_cases(&payload()).unwrap())
    .await
    .unwrap();

  let all = store.cases_by_total().await.unwrap();
  let names: Vec<&str> = all.iter().map(|c| c.country.as_str()).collect();
  assert_eq!(names, ["United States", "France", "S Korea"]);
}

#[tokio::test]
async fn pipeline_surfaces_unmatched_names_as_population_misses() {
  let store = SqliteStore::open_in_memory().await.unwrap();

  store
    .insert_population(wiki::parse_population(PAGE).unwrap())
    .await
    .unwrap();
  store
    .insert_cases(api::clean_cases(&payload()).unwrap())
    .await
    .unwrap();

  // "S-Korea" cleaned to "S Korea", which matches no table row: the case
  // record is present, the join misses, the percentage is undefined.
  let overview = store
    .overview("S Korea")
    .await
    .unwrap()
    .expect("case row present");
  assert!(overview.population.is_none());
  assert_eq!(overview.percent_affected(), None);
}
