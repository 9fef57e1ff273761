//! Country list pane — left panel, sorted descending by total cases.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;

/// Render the country list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_countries();
  let total = app.countries.len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Countries ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Countries ({}) ", total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  // Width available for the name column once the count column is placed.
  let count_width = 12usize;
  let name_width =
    (area.width as usize).saturating_sub(count_width + 4).max(8);

  // Build list items: name left, total cases right.
  let items: Vec<ListItem> = filtered
    .iter()
    .enumerate()
    .map(|(i, record)| {
      let is_cursor = i == app.list_cursor;

      let style = if is_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };

      let mut name = record.country.clone();
      if name.len() > name_width {
        name.truncate(name_width.saturating_sub(1));
        name.push('…');
      }

      ListItem::new(Line::from(vec![
        Span::styled(format!("{name:<name_width$}"), style),
        Span::styled(
          format!("{:>count_width$}", group_thousands(record.total_cases)),
          style.fg(if is_cursor { Color::White } else { Color::DarkGray }),
        ),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // If filter is active or set, show a filter bar at the bottom of the inner area.
  if app.filter_active || !app.filter.is_empty() && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      ratatui::widgets::Paragraph::new(filter_text)
        .style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  // Scrollable list with cursor tracking.
  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner_area,
    &mut state,
  );
}

/// `1988545` → `"1,988,545"` for display.
pub(crate) fn group_thousands(n: i64) -> String {
  let digits = n.unsigned_abs().to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
  if n < 0 {
    out.push('-');
  }
  let lead = digits.len() % 3;
  for (i, ch) in digits.chars().enumerate() {
    if i != 0 && i % 3 == lead % 3 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::group_thousands;

  #[test]
  fn groups_thousands_for_display() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(801), "801");
    assert_eq!(group_thousands(11_902), "11,902");
    assert_eq!(group_thousands(1_988_545), "1,988,545");
    assert_eq!(group_thousands(-4_200), "-4,200");
  }
}
