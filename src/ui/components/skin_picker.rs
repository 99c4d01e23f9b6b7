use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::skin::{Skin, SkinPalette};
use crate::ui::theme::Theme;

/// Row of mutually exclusive skin choices, `[1] Card  [2] Modern ...`.
pub struct SkinPicker<'a> {
    palettes: &'a [SkinPalette],
    selected: Skin,
    theme: &'a Theme,
}

impl<'a> SkinPicker<'a> {
    pub fn new(palettes: &'a [SkinPalette], selected: Skin, theme: &'a Theme) -> Self {
        Self {
            palettes,
            selected,
            theme,
        }
    }
}

impl Widget for SkinPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut spans = Vec::new();
        for (i, skin) in Skin::ALL.into_iter().enumerate() {
            let label = self
                .palettes
                .get(i)
                .map(|p| p.label.as_str())
                .unwrap_or(skin.as_str());
            let is_selected = skin == self.selected;
            let style = if is_selected {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!(" [{}] {label} ", i + 1), style));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
