//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use tally_core::{
  record::{CaseRecord, CountryOverview},
  store::StatsStore,
};
use tally_store_sqlite::SqliteStore;

// ─── Screen ───────────────────────────────────────────────────────────────────

/// Which pane owns the keyboard. The original surface for this browser was a
/// numeric menu driven by one loosely-typed control variable; here every
/// state is a variant and every transition is a match arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the country list (all countries, sorted by total cases).
  CountryList,
  /// Focus on the detail pane for one country.
  CountryDetail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// All case records, sorted descending by total cases at load time.
  pub countries: Vec<CaseRecord>,

  /// Current fuzzy-filter string (only editable when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* country list.
  pub list_cursor: usize,

  /// The overview shown in the detail pane.
  pub selected: Option<CountryOverview>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared store handle.
  pub store: SqliteStore,
}

impl App {
  /// Create an [`App`] with an empty country list.
  pub fn new(store: SqliteStore) -> Self {
    Self {
      screen: Screen::CountryList,
      countries: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      selected: None,
      status_msg: String::new(),
      store,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Load all countries from the store, sorted descending by total cases.
  pub async fn load_countries(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading countries…".into();
    match self.store.cases_by_total().await {
      Ok(countries) => {
        self.countries = countries;
        self.list_cursor = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e.into())
      }
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Countries matching the current filter query.
  pub fn filtered_countries(&self) -> Vec<&CaseRecord> {
    if self.filter.is_empty() {
      return self.countries.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .countries
      .iter()
      .filter(|c| matcher.fuzzy_match(&c.country, &self.filter).is_some())
      .collect()
  }

  /// The country under the list cursor in the filtered view, if any.
  pub fn cursor_country(&self) -> Option<&CaseRecord> {
    let list = self.filtered_countries();
    list.get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  /// Keys with no binding on the current screen are ignored.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      return self.handle_filter_key(key).await;
    }

    match self.screen {
      Screen::CountryList => self.handle_list_key(key).await,
      Screen::CountryDetail => self.handle_detail_key(key).await,
    }
  }

  async fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Immediately open detail if there's exactly one match.
        let only = {
          let list = self.filtered_countries();
          (list.len() == 1).then(|| list[0].country.clone())
        };
        if let Some(name) = only {
          self.open_detail(&name).await;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_countries().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
        }
      }

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(name) = self.cursor_country().map(|c| c.country.clone()) {
          self.open_detail(&name).await;
        }
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Back to list
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::CountryList;
        self.selected = None;
      }

      // Walk the list without leaving the detail pane.
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_countries().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
          if let Some(name) = self.cursor_country().map(|c| c.country.clone()) {
            self.open_detail(&name).await;
          }
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          if let Some(name) = self.cursor_country().map(|c| c.country.clone()) {
            self.open_detail(&name).await;
          }
        }
      }

      _ => {}
    }
    Ok(true)
  }

  /// Transition to `CountryDetail` for `country`, loading its overview.
  ///
  /// A lookup miss or store error stays on the list with a status message —
  /// the browser never aborts on an unknown name.
  async fn open_detail(&mut self, country: &str) {
    match self.store.overview(country).await {
      Ok(Some(overview)) => {
        self.selected = Some(overview);
        self.screen = Screen::CountryDetail;
        self.status_msg = String::new();
      }
      Ok(None) => {
        self.status_msg = format!("No case data for {country:?}");
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
      }
    }
  }
}
