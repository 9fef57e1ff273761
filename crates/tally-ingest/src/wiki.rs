//! Population-table cleaner — turns the scraped page into
//! [`PopulationRecord`]s.
//!
//! The page carries one sortable table with six columns: country, UN
//! continental region, UN statistical region, 2018 population, 2019
//! population, percentage change. Selection is by fixed class marker and is
//! deliberately brittle: if the markup drifts, parsing stops with an error
//! rather than guessing.

use tally_core::{
  clean::{parse_count, strip_footnote},
  record::PopulationRecord,
};

use crate::{
  error::{Error, Result},
  html,
};

/// Class marker of the population table on the scraped page.
const TABLE_CLASS: &str = "sortable";

/// Number of data cells each country row carries.
const ROW_CELLS: usize = 6;

/// Parse the scraped page into population records, in table order.
pub fn parse_population(doc: &str) -> Result<Vec<PopulationRecord>> {
  let table =
    html::find_table_with_class(doc, TABLE_CLASS).ok_or(Error::TableNotFound)?;

  check_headings(table)?;

  let mut records = Vec::new();
  let mut pos = 0usize;
  while let Some((tr_s, tr_e)) = html::next_tag_block(table, "<tr", "</tr>", pos)
  {
    let tr = &table[tr_s..tr_e];
    pos = tr_e;

    let cells = row_cells(tr);
    // Header and section rows carry no <td> cells.
    if cells.is_empty() {
      continue;
    }
    if cells.len() < ROW_CELLS {
      return Err(Error::RowShape { found: cells.len() });
    }

    records.push(PopulationRecord {
      country:            strip_footnote(&cells[0]),
      continental_region: cells[1].clone(),
      statistical_region: cells[2].clone(),
      population_2018:    parse_count(&cells[3])?,
      population_2019:    parse_count(&cells[4])?,
      change:             cells[5].clone(),
    });
  }

  Ok(records)
}

/// Collect `<td>` cell text for one `<tr>` block.
fn row_cells(tr: &str) -> Vec<String> {
  let mut cells = Vec::new();
  let mut pos = 0usize;
  while let Some((td_s, td_e)) = html::next_tag_block(tr, "<td", "</td>", pos) {
    cells.push(html::cell_text(&tr[td_s..td_e]));
    pos = td_e;
  }
  cells
}

/// Sanity-check the `<th>` headings: the first one names the country
/// column. Catches the page restructuring under us before we load garbage.
fn check_headings(table: &str) -> Result<()> {
  let mut pos = 0usize;
  let mut headings = Vec::new();
  while let Some((th_s, th_e)) = html::next_tag_block(table, "<th", "</th>", pos)
  {
    headings.push(strip_footnote(&html::cell_text(&table[th_s..th_e])));
    pos = th_e;
    if headings.len() == ROW_CELLS {
      break;
    }
  }

  match headings.first() {
    Some(first) if first.contains("Country") => Ok(()),
    Some(first) => Err(Error::TableShape(format!(
      "first heading is {first:?}, expected a country column"
    ))),
    None => Err(Error::TableShape("table has no headings".into())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const FIXTURE: &str = r#"
    <table class="wikitable sortable">
      <tbody>
        <tr>
          <th>Country (or dependent territory)[4]</th>
          <th>UN continental region[1]</th>
          <th>UN statistical region[1]</th>
          <th>Population (1 July 2018)</th>
          <th>Population (1 July 2019)</th>
          <th>Change</th>
        </tr>
        <tr>
          <td><a href="/wiki/China">China</a>[a]</td>
          <td>Asia</td>
          <td>Eastern Asia</td>
          <td>1,427,647,786</td>
          <td>1,433,783,686</td>
          <td>+0.43%</td>
        </tr>
        <tr>
          <td>United States</td>
          <td>Americas</td>
          <td>Northern America</td>
          <td>327,096,265</td>
          <td>329,064,917</td>
          <td>+0.60%</td>
        </tr>
      </tbody>
    </table>
  "#;

  #[test]
  fn parses_rows_and_skips_heading_row() {
    let records = parse_population(FIXTURE).unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].country, "China");
    assert_eq!(records[0].continental_region, "Asia");
    assert_eq!(records[0].population_2018, 1_427_647_786);
    assert_eq!(records[0].population_2019, 1_433_783_686);
    assert_eq!(records[0].change, "+0.43%");

    assert_eq!(records[1].country, "United States");
    assert_eq!(records[1].statistical_region, "Northern America");
  }

  #[test]
  fn missing_table_errors() {
    let err = parse_population("<p>not a table in sight</p>").unwrap_err();
    assert!(matches!(err, Error::TableNotFound));
  }

  #[test]
  fn unexpected_headings_error() {
    let doc = r#"<table class="sortable"><tr><th>Season</th></tr></table>"#;
    let err = parse_population(doc).unwrap_err();
    assert!(matches!(err, Error::TableShape(_)));
  }

  #[test]
  fn short_row_errors() {
    let doc = r#"
      <table class="sortable">
        <tr><th>Country</th></tr>
        <tr><td>Atlantis</td><td>Nowhere</td></tr>
      </table>
    "#;
    let err = parse_population(doc).unwrap_err();
    assert!(matches!(err, Error::RowShape { found: 2 }));
  }
}
