//! SQL schema for the tally SQLite store.
//!
//! Two fixed-shape tables, one per source. Refreshes replace table contents
//! wholesale via [`DROP_TABLES`] + [`CREATE_TABLES`]; historical retention
//! is a non-goal.

/// Run once at connection startup.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
/// The population-year column names start with a digit and stay quoted
/// everywhere they appear.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS "Cases" (
    "Id"          INTEGER PRIMARY KEY AUTOINCREMENT,
    "Country"     TEXT NOT NULL,
    "NewCases"    INTEGER,
    "ActiveCases" INTEGER,
    "NewDeaths"   INTEGER,
    "TotalCases"  INTEGER
);

CREATE TABLE IF NOT EXISTS "Population" (
    "Id"                  INTEGER PRIMARY KEY AUTOINCREMENT,
    "Country"             TEXT NOT NULL,
    "UNContinentalRegion" TEXT,
    "UNStatisticalRegion" TEXT,
    "2018population"      INTEGER,
    "2019population"      INTEGER,
    "PopulationChange"    TEXT
);
"#;

/// Destructive reset, paired with [`CREATE_TABLES`] by `reset_schema`.
pub const DROP_TABLES: &str = r#"
DROP TABLE IF EXISTS "Cases";
DROP TABLE IF EXISTS "Population";
"#;
