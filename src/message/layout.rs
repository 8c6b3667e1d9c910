//! Width-aware truncation and word wrapping.

use std::io::IsTerminal;

use unicode_width::UnicodeWidthStr;

/// Marker appended to a truncated line.
pub const ELLIPSIS: &str = "…";

/// Column budget for the rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    /// No limit: nothing is truncated or wrapped.
    Unlimited,
    /// Lines are fitted to this many terminal cells.
    Fixed(usize),
}

impl Columns {
    /// Reads the width of the terminal attached to stdout.
    ///
    /// Returns [`Columns::Unlimited`] when stdout is not a terminal or its
    /// size cannot be queried.
    pub fn from_terminal() -> Self {
        if !std::io::stdout().is_terminal() {
            return Columns::Unlimited;
        }
        match crossterm::terminal::size() {
            Ok((cols, _)) if cols > 0 => Columns::Fixed(usize::from(cols)),
            Ok(_) => Columns::Unlimited,
            Err(e) => {
                tracing::debug!("Could not read terminal size: {e}");
                Columns::Unlimited
            }
        }
    }
}

/// Strategy used by the formatter to fit text into a column budget.
pub trait TextLayout: Send + Sync {
    /// Shortens a single line to at most `columns` cells.
    fn truncate(&self, text: &str, columns: usize) -> String;

    /// Breaks text on spaces so no line is wider than `columns` cells,
    /// except for single words that are wider on their own.
    fn wrap(&self, text: &str, columns: usize) -> String;
}

/// Default layout: measures display width, so wide glyphs count double.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayWidthLayout;

impl TextLayout for DisplayWidthLayout {
    fn truncate(&self, text: &str, columns: usize) -> String {
        if columns == 0 {
            return String::new();
        }
        if text.width() <= columns {
            return text.to_string();
        }
        if columns == 1 {
            return ELLIPSIS.to_string();
        }

        // Measure the whole prefix: a variation selector can widen the glyph
        // before it, so per-char widths do not add up to the string width.
        let budget = columns - ELLIPSIS.width();
        let mut out = String::new();
        for c in text.chars() {
            let candidate = format!("{out}{c}");
            if candidate.width() > budget {
                break;
            }
            out = candidate;
        }
        out.push_str(ELLIPSIS);
        out
    }

    fn wrap(&self, text: &str, columns: usize) -> String {
        text.replace("\r\n", "\n")
            .split('\n')
            .map(|line| wrap_line(line, columns))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn wrap_line(line: &str, columns: usize) -> String {
    if line.trim().is_empty() {
        return String::new();
    }

    let mut rows: Vec<String> = Vec::new();
    let mut row = String::new();

    for (i, word) in line.split(' ').enumerate() {
        let trimmed = row.trim_start();
        if trimmed.len() != row.len() {
            row = trimmed.to_string();
        }

        let mut row_width = row.width();
        if i > 0 && row_width > 0 {
            row.push(' ');
            row_width += 1;
        }

        let word_width = word.width();
        if row_width + word_width > columns && row_width > 0 && word_width > 0 {
            rows.push(std::mem::take(&mut row));
        }
        row.push_str(word);
    }
    rows.push(row);

    rows.iter()
        .map(|r| r.trim_end_matches(' '))
        .collect::<Vec<_>>()
        .join("\n")
}
