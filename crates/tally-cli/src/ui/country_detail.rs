//! Country detail pane — case counts, population comparison, and the
//! percentage-affected figure for one country.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, ui::country_list::group_thousands};

/// Render the detail pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(overview) = &app.selected else {
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", overview.cases.country))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  // ── Cases ───────────────────────────────────────────────────────────────
  lines.push(section("Cases"));
  lines.push(field("total", group_thousands(overview.cases.total_cases)));
  lines.push(field("active", group_thousands(overview.cases.active_cases)));
  lines.push(field("new", group_thousands(overview.cases.new_cases)));
  lines.push(field("new deaths", group_thousands(overview.cases.new_deaths)));
  lines.push(Line::from(""));

  // ── Population ──────────────────────────────────────────────────────────
  lines.push(section("Population"));
  match &overview.population {
    Some(pop) => {
      lines.push(field("region", pop.continental_region.clone()));
      lines.push(field("subregion", pop.statistical_region.clone()));
      lines.push(field("2018", group_thousands(pop.population_2018)));
      lines.push(field("2019", group_thousands(pop.population_2019)));
      lines.push(field("change", pop.change.clone()));
    }
    None => {
      // The name join is exact and the alias list is short; a miss is
      // shown, not hidden.
      lines.push(notice("no population row matches this name"));
    }
  }
  lines.push(Line::from(""));

  // ── Affected ────────────────────────────────────────────────────────────
  lines.push(section("Affected"));
  match overview.percent_affected() {
    Some(pct) => {
      lines.push(field("share of 2019", format!("{pct:.4}%")));
    }
    None => {
      lines.push(notice("unavailable without a population match"));
    }
  }

  f.render_widget(Paragraph::new(lines), inner);
}

// ─── Line helpers ─────────────────────────────────────────────────────────────

fn section(title: &str) -> Line<'_> {
  Line::from(Span::styled(
    title,
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ))
}

fn field(label: &str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("  {label:<14}"),
      Style::default().fg(Color::DarkGray),
    ),
    Span::raw(value),
  ])
}

fn notice(text: &str) -> Line<'static> {
  Line::from(Span::styled(
    format!("  {text}"),
    Style::default().fg(Color::DarkGray),
  ))
}
