//! `tally` — terminal browser for COVID case / population statistics.
//!
//! # Usage
//!
//! ```
//! tally --api-key <KEY>            # first run: fetch, load, browse
//! tally                           # browse the existing database
//! tally --refresh --headless      # re-ingest both sources and exit
//! tally --config ~/.config/tally/config.toml
//! ```

mod app;
mod refresh;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use refresh::Sources;
use serde::Deserialize;
use tally_core::store::StatsStore;
use tally_ingest::{FetchCache, SourceClient};
use tally_store_sqlite::SqliteStore;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// ─── Defaults ─────────────────────────────────────────────────────────────────

const DEFAULT_DB: &str = "covid_stats.sqlite";
const DEFAULT_CACHE: &str = "covid_cache.json";
const DEFAULT_WIKI_URL: &str =
  "https://en.wikipedia.org/wiki/List_of_countries_by_population_(United_Nations)";
const DEFAULT_API_URL: &str = "https://covid-193.p.rapidapi.com/statistics";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "tally",
  about = "Fetch, store, and browse COVID case / population statistics"
)]
struct Args {
  /// Path to a TOML config file (paths, api key, source URLs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database path.
  #[arg(long, env = "TALLY_DB")]
  db: Option<PathBuf>,

  /// Fetch-cache file path.
  #[arg(long, env = "TALLY_CACHE")]
  cache: Option<PathBuf>,

  /// Statistics API key (sent as x-rapidapi-key).
  #[arg(long, env = "TALLY_API_KEY")]
  api_key: Option<String>,

  /// Narrow the statistics call to one country.
  #[arg(long)]
  country: Option<String>,

  /// Re-ingest both sources even if the database is already populated.
  #[arg(long)]
  refresh: bool,

  /// Refresh and exit without launching the browser.
  #[arg(long)]
  headless: bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file. Every key mirrors a flag.
#[derive(Deserialize, Default)]
struct ConfigFile {
  db:       Option<PathBuf>,
  cache:    Option<PathBuf>,
  api_key:  Option<String>,
  country:  Option<String>,
  wiki_url: Option<String>,
  api_url:  Option<String>,
}

/// Fully-resolved settings: CLI flags override the config file, which
/// overrides defaults.
struct Settings {
  db:      PathBuf,
  cache:   PathBuf,
  api_key: Option<String>,
  sources: SourceUrls,
  country: Option<String>,
}

struct SourceUrls {
  wiki: String,
  api:  String,
}

fn resolve(args: &Args, file: ConfigFile) -> Settings {
  Settings {
    db: args
      .db
      .clone()
      .or(file.db)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_DB)),
    cache: args
      .cache
      .clone()
      .or(file.cache)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE)),
    api_key: args.api_key.clone().or(file.api_key),
    country: args.country.clone().or(file.country),
    sources: SourceUrls {
      wiki: file.wiki_url.unwrap_or_else(|| DEFAULT_WIKI_URL.to_string()),
      api:  file.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
    },
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Logs go to stderr; the browser owns stdout.
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::registry()
    .with(env_filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr),
    )
    .init();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let settings = resolve(&args, file_cfg);

  let store = SqliteStore::open(&settings.db)
    .await
    .with_context(|| format!("opening database {}", settings.db.display()))?;

  // Refresh when forced, when running headless, or on an empty database.
  let loaded = !store.cases_by_total().await?.is_empty();
  if args.refresh || args.headless || !loaded {
    let api_key = settings.api_key.clone().context(
      "an API key is required to refresh (pass --api-key or set TALLY_API_KEY)",
    )?;

    let client = SourceClient::new()?;
    let mut cache = FetchCache::load(&settings.cache);
    let sources = Sources {
      wiki_url: settings.sources.wiki.clone(),
      api_url:  settings.sources.api.clone(),
      api_key,
      country:  settings.country.clone(),
    };

    let outcome = refresh::run(&store, &client, &mut cache, &sources).await?;
    info!(
      population_rows = outcome.population_rows,
      case_rows = outcome.case_rows,
      "refresh complete"
    );
  }

  if args.headless {
    return Ok(());
  }

  let mut app = App::new(store);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data.
  let load_result = app.load_countries().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
