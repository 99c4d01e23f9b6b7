use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Screen regions of the chest view, top to bottom.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub skins: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// `footer_rows` is the number of hint rows to make room for.
    pub fn new(area: Rect, footer_rows: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(footer_rows.max(1)),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            skins: vertical[2],
            status: vertical[3],
            footer: vertical[4],
        }
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.width() > width {
            let mut split_at = word.len();
            let mut acc = 0;
            for (i, ch) in word.char_indices() {
                let w = ch.width().unwrap_or(0);
                if i > 0 && acc + w > width {
                    split_at = i;
                    break;
                }
                acc += w;
            }
            let tail = word.split_off(split_at);
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(std::mem::replace(&mut word, tail));
        }
        if word.is_empty() {
            continue;
        }
        if current.is_empty() {
            current = word;
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay key hints out left to right, opening a new row whenever the next hint
/// would run past `width`. A hint wider than `width` gets a row of its own.
pub fn hint_rows(hints: &[String], width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut rows = Vec::new();
    let mut row = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        if !row.is_empty() && row.width() + 2 + hint.width() > width {
            rows.push(std::mem::take(&mut row));
        }
        row.push_str(if row.is_empty() { " " } else { "  " });
        row.push_str(hint);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// A `width`×`height` rect centred in `area`, shrunk to fit when needed.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let left = area.x.saturating_add(area.width.saturating_sub(w) / 2);
    let top = area.y.saturating_add(area.height.saturating_sub(h) / 2);
    Rect::new(left, top, w, h)
}
