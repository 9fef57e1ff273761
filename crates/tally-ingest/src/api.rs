//! Case-payload cleaner — turns the statistics API response into
//! [`CaseRecord`]s.

use serde::Deserialize;
use tally_core::{clean::parse_delta, name::canonical_country, record::CaseRecord};

use crate::error::Result;

// ─── Wire shape ──────────────────────────────────────────────────────────────

/// Top-level response envelope. The API carries many more fields per item
/// (tests, per-million rates, timestamps); only the ones the pipeline keeps
/// are decoded.
#[derive(Debug, Deserialize)]
pub struct CasePayload {
  pub response: Vec<CaseItem>,
}

#[derive(Debug, Deserialize)]
pub struct CaseItem {
  pub country: String,
  pub cases:   CaseCounts,
  pub deaths:  DeathCounts,
}

/// `new` arrives as a signed string (`"+1234"`) or null; `active` and
/// `total` as plain integers or null.
#[derive(Debug, Deserialize)]
pub struct CaseCounts {
  pub new:    Option<String>,
  pub active: Option<i64>,
  pub total:  Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeathCounts {
  pub new: Option<String>,
}

// ─── Cleaning ────────────────────────────────────────────────────────────────

/// Clean a raw response payload into case records, one per response item.
///
/// The API mixes continents and other aggregates ("Asia", "All") into the
/// country list; they come through as ordinary records. Country names are
/// canonicalized so the population join works for the known aliases.
pub fn clean_cases(payload: &serde_json::Value) -> Result<Vec<CaseRecord>> {
  let decoded: CasePayload = serde_json::from_value(payload.clone())?;
  decoded.response.iter().map(clean_item).collect()
}

fn clean_item(item: &CaseItem) -> Result<CaseRecord> {
  Ok(CaseRecord {
    country:      canonical_country(&item.country),
    new_cases:    parse_delta(item.cases.new.as_deref())?,
    active_cases: item.cases.active.unwrap_or(0),
    new_deaths:   parse_delta(item.deaths.new.as_deref())?,
    total_cases:  item.cases.total.unwrap_or(0),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn payload() -> serde_json::Value {
    json!({
      "response": [
        {
          "country": "USA",
          "cases": { "new": "+24998", "active": 1_162_087, "total": 1_988_545 },
          "deaths": { "new": "+721" }
        },
        {
          "country": "S-Korea",
          "cases": { "new": null, "active": 1277, "total": 11_902 },
          "deaths": { "new": null }
        },
        {
          "country": "France",
          "cases": { "new": "+343", "active": null, "total": null },
          "deaths": { "new": "-1" }
        }
      ]
    })
  }

  #[test]
  fn cleans_signed_strings_and_nulls() {
    let records = clean_cases(&payload()).unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].new_cases, 24_998);
    assert_eq!(records[0].new_deaths, 721);
    assert_eq!(records[0].total_cases, 1_988_545);

    // null deltas and counts all land on zero
    assert_eq!(records[1].new_cases, 0);
    assert_eq!(records[1].new_deaths, 0);
    assert_eq!(records[2].active_cases, 0);
    assert_eq!(records[2].total_cases, 0);

    // negative corrections survive
    assert_eq!(records[2].new_deaths, -1);
  }

  #[test]
  fn canonicalizes_country_names() {
    let records = clean_cases(&payload()).unwrap();
    assert_eq!(records[0].country, "United States");
    assert_eq!(records[1].country, "S Korea");
    assert_eq!(records[2].country, "France");
  }

  #[test]
  fn response_items_beyond_the_decoded_fields_are_ignored() {
    let value = json!({
      "response": [{
        "country": "Italy",
        "continent": "Europe",
        "cases": { "new": "+99", "active": 5, "total": 10, "critical": 1 },
        "deaths": { "new": null, "total": 2 },
        "tests": { "total": 12345 }
      }]
    });
    let records = clean_cases(&value).unwrap();
    assert_eq!(records[0].country, "Italy");
    assert_eq!(records[0].new_cases, 99);
  }
}
