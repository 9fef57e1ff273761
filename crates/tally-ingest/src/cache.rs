//! Durable fetch cache — a key→payload mapping mirrored to one JSON file.
//!
//! Keys are request URLs; values are raw response payloads (the API body as
//! a JSON value, the scraped page as a JSON string). Entries are never
//! evicted or expired. The cache file is a process-local resource; a single
//! process instance is assumed, so there is no locking.

use std::{collections::BTreeMap, fs, io, path::PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;

/// An explicit cache value — constructed once, owned by the refresh step,
/// and passed by mutable reference into the fetch path. Not a global.
pub struct FetchCache {
  path:    PathBuf,
  entries: BTreeMap<String, Value>,
}

impl FetchCache {
  /// Read the persisted mapping at `path`.
  ///
  /// A missing file starts empty; an unreadable or unparseable one also
  /// starts empty — losing the cache only costs a re-fetch, so corruption
  /// is logged and recovered from, never fatal.
  pub fn load(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let entries = match fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
          warn!(path = %path.display(), error = %e,
                "cache file corrupt, starting empty");
          BTreeMap::new()
        }
      },
      Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
      Err(e) => {
        warn!(path = %path.display(), error = %e,
              "cache file unreadable, starting empty");
        BTreeMap::new()
      }
    };
    debug!(path = %path.display(), entries = entries.len(), "cache loaded");
    Self { path, entries }
  }

  /// O(1) membership check against the in-memory mapping.
  pub fn lookup(&self, key: &str) -> Option<&Value> {
    self.entries.get(key)
  }

  /// Insert an entry and immediately rewrite the whole persisted file.
  /// At most one entry per key — a repeat key overwrites.
  pub fn store(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
    self.entries.insert(key.into(), value);
    fs::write(&self.path, serde_json::to_string(&self.entries)?)?;
    Ok(())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
