use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

#[derive(Clone, Copy)]
enum Part {
    Lid,
    Band,
    Body,
    Lock,
}

const ART: [(&str, Part); 9] = [
    ("      ▁▂▃▄▅▅▅▅▄▃▂▁      ", Part::Lid),
    ("   ▗▄▟████████████▙▄▖   ", Part::Lid),
    ("  ▐██▚▚▚▚▚▚▚▚▚▚▚▚▚▚██▌  ", Part::Lid),
    ("  ▐━━━━━━━━━━━━━━━━━━▌  ", Part::Band),
    ("  ▐██████▛▀▀▀▀▜██████▌  ", Part::Body),
    ("  ▐██████▌ ◉◉ ▐██████▌  ", Part::Lock),
    ("  ▐██████▙▄▄▄▄▟██████▌  ", Part::Body),
    ("  ▐██████████████████▌  ", Part::Body),
    ("   ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀   ", Part::Body),
];

const SPARKLES: [(u16, u16); 6] = [(0, 1), (23, 0), (1, 7), (22, 6), (11, 0), (24, 4)];

/// Horizontal offsets of the attention shake, one per frame.
const SHAKE: [i16; 6] = [0, -1, 1, -1, 1, 0];

/// The closed chest. `frame` only drives the idle shimmer and shake.
pub struct Chest<'a> {
    theme: &'a Theme,
    frame: u64,
}

impl<'a> Chest<'a> {
    pub fn new(theme: &'a Theme, frame: u64) -> Self {
        Self { theme, frame }
    }

    pub fn size() -> (u16, u16) {
        (ART[0].0.width() as u16, ART.len() as u16)
    }

    fn shake_offset(&self) -> i16 {
        // shake for six frames out of every ninety
        let phase = (self.frame % 90) as usize;
        SHAKE.get(phase).copied().unwrap_or(0)
    }
}

impl Widget for Chest<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (w, h) = Self::size();
        if area.width < w || area.height < h {
            return;
        }

        let dx = self.shake_offset();
        let left = i32::from(area.x) + i32::from(area.width.saturating_sub(w) / 2) + i32::from(dx);
        let left = left.clamp(i32::from(area.x), i32::from(area.x + area.width - w)) as u16;
        let top = area.y + area.height.saturating_sub(h) / 2;

        for (row, (line, part)) in ART.iter().enumerate() {
            let style = match part {
                Part::Lid => Style::default().fg(colors.chest_lid()),
                Part::Band => Style::default().fg(colors.chest_band()),
                Part::Body => Style::default().fg(colors.chest_body()),
                Part::Lock => Style::default().fg(colors.chest_body()),
            };
            buf.set_string(left, top + row as u16, line, style);
        }

        let lock_row = ART.iter().position(|(_, p)| matches!(p, Part::Lock)).unwrap_or(0) as u16;
        let lock_col = ART[lock_row as usize].0.chars().position(|c| c == '◉').unwrap_or(0) as u16;
        let pulse = if (self.frame / 15) % 2 == 0 {
            Modifier::BOLD
        } else {
            Modifier::DIM
        };
        buf.set_string(
            left + lock_col,
            top + lock_row,
            "◉◉",
            Style::default().fg(colors.chest_lock()).add_modifier(pulse),
        );

        let lit = (self.frame / 8) as usize % SPARKLES.len();
        for (i, (sx, sy)) in SPARKLES.iter().enumerate() {
            let glyph = if i == lit { "✦" } else { "·" };
            let (x, y) = (left + sx, top + sy);
            if x < area.x + area.width && y < area.y + area.height && buf[(x, y)].symbol() == " " {
                buf.set_string(x, y, glyph, Style::default().fg(colors.accent()));
            }
        }
    }
}
