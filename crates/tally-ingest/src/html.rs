//! Minimal HTML tag scanning for table extraction.
//!
//! There is no grammar here — just enough substring slicing to pull
//! `<tr>`/`<td>`/`<th>` blocks out of one known table and reduce each cell
//! to clean text. Markup drift is handled by the callers erroring out, not
//! by parsing more HTML.

/// Inner content of the first `<table>` whose `class` attribute value
/// contains `class_marker`.
pub(crate) fn find_table_with_class<'a>(
  doc: &'a str,
  class_marker: &str,
) -> Option<&'a str> {
  let mut from = 0usize;
  while let Some(rel) = doc[from..].find("<table") {
    let start = from + rel;
    let open_end = doc[start..].find('>')? + start;
    let attrs = &doc[start..open_end];
    if attrs.contains(class_marker) {
      let inner_start = open_end + 1;
      let inner_len = doc[inner_start..].find("</table>")?;
      return Some(&doc[inner_start..inner_start + inner_len]);
    }
    from = open_end + 1;
  }
  None
}

/// Next `open`…`close` block at or after `from`, as byte offsets into `s`.
/// The span includes the close tag. The character after `open` must not be
/// alphanumeric, so `"<th"` does not match `<thead>`.
pub(crate) fn next_tag_block(
  s: &str,
  open: &str,
  close: &str,
  from: usize,
) -> Option<(usize, usize)> {
  let mut at = from;
  loop {
    let start = s.get(at..)?.find(open)? + at;
    let boundary = s[start + open.len()..].chars().next()?;
    if boundary.is_ascii_alphanumeric() {
      at = start + open.len();
      continue;
    }
    let open_end = s[start..].find('>')? + start + 1;
    let close_rel = s[open_end..].find(close)?;
    return Some((start, open_end + close_rel + close.len()));
  }
}

/// Content between a block's open tag and its close tag.
pub(crate) fn inner_after_open_tag(block: &str) -> &str {
  match (block.find('>'), block.rfind('<')) {
    (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
    _ => "",
  }
}

/// Drop everything between `<` and `>`.
fn strip_tags(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut in_tag = false;
  for ch in s.chars() {
    match ch {
      '<' => in_tag = true,
      '>' => in_tag = false,
      _ if !in_tag => out.push(ch),
      _ => {}
    }
  }
  out
}

fn normalize_entities(s: &str) -> String {
  s.replace("&nbsp;", " ").replace("&amp;", "&")
}

/// Collapse runs of whitespace (including newlines inside cells) to single
/// spaces and trim.
fn normalize_ws(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut prev_space = false;
  for ch in s.chars() {
    if ch.is_whitespace() {
      if !prev_space {
        out.push(' ');
        prev_space = true;
      }
    } else {
      out.push(ch);
      prev_space = false;
    }
  }
  out.trim().to_string()
}

/// A cell block reduced to clean text: tags stripped, entities and
/// whitespace normalized.
pub(crate) fn cell_text(block: &str) -> String {
  normalize_ws(&strip_tags(&normalize_entities(inner_after_open_tag(block))))
}
