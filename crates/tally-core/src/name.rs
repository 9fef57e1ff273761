//! Country-name canonicalization between the two sources.
//!
//! The statistics API and the population table spell some countries
//! differently. The population table is treated as canonical; API names are
//! rewritten at clean time so the name join can use exact string equality.

/// Known API→table spelling corrections. Deliberately small: only the
/// mismatches observed between the two sources are listed, and a name with
/// no entry passes through unreconciled.
const ALIASES: &[(&str, &str)] = &[
  ("USA", "United States"),
  ("UK", "United Kingdom"),
];

/// Canonicalize an API country name.
///
/// Aliases take precedence; otherwise hyphens become spaces (the API writes
/// `"S-Korea"` where the table writes multi-word names).
pub fn canonical_country(raw: &str) -> String {
  let trimmed = raw.trim();
  for (alias, canonical) in ALIASES {
    if trimmed == *alias {
      return (*canonical).to_string();
    }
  }
  trimmed.replace('-', " ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aliases_map_to_table_spelling() {
    assert_eq!(canonical_country("USA"), "United States");
    assert_eq!(canonical_country("UK"), "United Kingdom");
  }

  #[test]
  fn hyphens_become_spaces() {
    assert_eq!(canonical_country("S-Korea"), "S Korea");
    assert_eq!(canonical_country("Guinea-Bissau"), "Guinea Bissau");
  }

  #[test]
  fn unlisted_names_pass_through() {
    assert_eq!(canonical_country("France"), "France");
    assert_eq!(canonical_country(" Italy "), "Italy");
  }
}
