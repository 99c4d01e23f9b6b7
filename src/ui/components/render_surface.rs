use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::prediction::PredictionEntry;
use crate::prediction::catalog::CatalogStrings;
use crate::ui::layout::wrap_words;
use crate::ui::skin::{SkinPalette, SkinShape};

/// Fixed decorations of the phone screen: (column, row, glyph), relative to
/// the inner area.
const PHONE_DECOR: [(u16, u16, &str); 6] = [
    (2, 3, "✨"),
    (25, 5, "⭐"),
    (1, 18, "💫"),
    (25, 19, "🌟"),
    (27, 8, "○"),
    (2, 12, "○"),
];

/// The prediction card. Everything drawn is a function of the entry, the
/// palette and the catalog strings; no clocks, no randomness, so a capture
/// taken for export matches what is on screen.
pub struct RenderSurface<'a> {
    current: Option<&'a PredictionEntry>,
    palette: &'a SkinPalette,
    strings: &'a CatalogStrings,
}

impl<'a> RenderSurface<'a> {
    pub fn new(
        current: Option<&'a PredictionEntry>,
        palette: &'a SkinPalette,
        strings: &'a CatalogStrings,
    ) -> Self {
        Self {
            current,
            palette,
            strings,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        self.palette.shape.size()
    }

    /// Render into a fresh buffer of the skin's natural size.
    pub fn capture(&self) -> Buffer {
        let (w, h) = self.size();
        let area = Rect::new(0, 0, w, h);
        let mut buf = Buffer::empty(area);
        self.render(area, &mut buf);
        buf
    }

    fn paint_gradient(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.palette.colors;
        let (top, bottom) = (colors.background(), colors.glow());
        for row in 0..area.height {
            let t = if area.height > 1 {
                f32::from(row) / f32::from(area.height - 1)
            } else {
                0.0
            };
            let bg = blend(top, bottom, t);
            for col in 0..area.width {
                let cell = &mut buf[(area.x + col, area.y + row)];
                cell.set_symbol(" ");
                cell.set_bg(bg);
            }
        }
    }

    fn frame_block(&self) -> Block<'static> {
        let colors = &self.palette.colors;
        match self.palette.shape {
            SkinShape::Card => Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(colors.frame())),
            SkinShape::Phone => Block::bordered()
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(colors.frame()).bg(colors.frame())),
        }
    }

    fn paint_decor(&self, inner: Rect, buf: &mut Buffer) {
        let colors = &self.palette.colors;
        let accent = Style::default().fg(colors.accent());
        let muted = Style::default().fg(colors.muted());

        match self.palette.shape {
            SkinShape::Card => {
                let right = inner.x + inner.width.saturating_sub(2);
                let bottom = inner.y + inner.height.saturating_sub(1);
                buf.set_string(inner.x + 1, inner.y, "┏━", accent);
                buf.set_string(right.saturating_sub(1), inner.y, "━┓", accent);
                buf.set_string(inner.x + 1, bottom, "┗━", accent);
                buf.set_string(right.saturating_sub(1), bottom, "━┛", accent);
            }
            SkinShape::Phone => {
                let notch = "▀▀▀▀▀▀ ● ";
                let x = inner.x + inner.width.saturating_sub(notch.width() as u16) / 2;
                buf.set_string(x, inner.y, notch, Style::default().fg(Color::Black));
                for (col, row, glyph) in PHONE_DECOR {
                    if col + glyph.width() as u16 <= inner.width && row < inner.height {
                        buf.set_string(inner.x + col, inner.y + row, glyph, muted);
                    }
                }
            }
        }
    }

    fn content_lines(&self, width: usize) -> Vec<Line<'static>> {
        let colors = &self.palette.colors;
        let heading = Style::default()
            .fg(colors.heading())
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(colors.muted());
        let text = Style::default()
            .fg(colors.text())
            .add_modifier(Modifier::ITALIC);
        let accent = Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        match self.current {
            Some(entry) => {
                lines.push(Line::from(Span::styled(entry.marker.clone(), accent)));
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("✦ ", muted),
                    Span::styled(self.strings.heading.to_uppercase(), heading),
                    Span::styled(" ✦", muted),
                ]));
                lines.push(Line::from(Span::styled("∿∿∿∿∿∿∿∿∿∿", muted)));
                lines.push(Line::from(""));
                let quoted = format!("“{}”", entry.text);
                for line in wrap_words(&quoted, width) {
                    lines.push(Line::from(Span::styled(line, text)));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("∿∿∿∿∿∿∿∿∿∿", muted)));
            }
            None => {
                lines.push(Line::from(Span::styled("?", accent)));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(self.strings.heading.to_uppercase(), heading)));
                lines.push(Line::from(""));
                for line in wrap_words(&self.strings.call_to_action, width) {
                    lines.push(Line::from(Span::styled(line, muted)));
                }
            }
        }
        lines
    }
}

impl Widget for &RenderSurface<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 4 {
            return;
        }
        self.paint_gradient(area, buf);

        let block = self.frame_block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        self.paint_decor(inner, buf);

        // one row reserved for the footer, one for the decoration row on top
        let body = Rect::new(
            inner.x + 1,
            inner.y + 1,
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(3),
        );
        let lines = self.content_lines(body.width.saturating_sub(2) as usize);
        let used = (lines.len() as u16).min(body.height);
        let top = body.y + (body.height - used) / 2;
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(Rect::new(body.x, top, body.width, used), buf);

        if !self.strings.footer.is_empty() {
            let footer_row = inner.y + inner.height.saturating_sub(2);
            Paragraph::new(Line::from(Span::styled(
                self.strings.footer.to_uppercase(),
                Style::default().fg(self.palette.colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(Rect::new(inner.x, footer_row, inner.width, 1), buf);
        }
    }
}

fn blend(a: Color, b: Color, t: f32) -> Color {
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => a,
        _ => b,
    }
}
