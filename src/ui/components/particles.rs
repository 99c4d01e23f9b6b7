use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::effects::confetti::ConfettiField;
use crate::effects::controller::EffectsController;
use crate::ui::theme::Theme;

/// Draws snow and confetti over the screen, only on blank cells of the
/// screen backdrop so the card and the chest stay readable.
pub struct ParticleLayer<'a> {
    effects: &'a EffectsController,
    theme: &'a Theme,
}

impl<'a> ParticleLayer<'a> {
    pub fn new(effects: &'a EffectsController, theme: &'a Theme) -> Self {
        Self { effects, theme }
    }
}

fn put(buf: &mut Buffer, area: Rect, backdrop: Color, x: i32, y: i32, glyph: char, style: Style) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (area.x as i32 + x, area.y as i32 + y);
    if x >= i32::from(area.x + area.width) || y >= i32::from(area.y + area.height) {
        return;
    }
    let cell = &mut buf[(x as u16, y as u16)];
    if cell.symbol() == " " && cell.bg == backdrop {
        cell.set_char(glyph);
        cell.set_fg(style.fg.unwrap_or_default());
    }
}

impl Widget for ParticleLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let backdrop = self.theme.colors.bg();
        if let Some(snow) = self.effects.snow() {
            let style = Style::default().fg(self.theme.colors.snow());
            for flake in snow.flakes() {
                put(buf, area, backdrop, flake.x as i32, flake.y as i32, flake.glyph, style);
            }
        }
        for p in self.effects.confetti().particles() {
            let (x, y) = ConfettiField::cell_of(p);
            put(buf, area, backdrop, x, y, p.shape, Style::default().fg(p.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::controller::EffectsSettings;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::time::{Duration, Instant};

    #[test]
    fn confetti_never_overwrites_content() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 10);
        let settings = EffectsSettings {
            celebration: Duration::from_secs(1),
            snowflakes: Some(60),
        };
        let mut fx = EffectsController::mount(area, settings, SmallRng::seed_from_u64(3));
        fx.celebrate(Instant::now());
        fx.tick(Instant::now());

        let mut buf = Buffer::empty(area);
        for y in 0..10 {
            buf.set_string(0, y, "#".repeat(30), Style::default().bg(theme.colors.bg()));
        }
        ParticleLayer::new(&fx, &theme).render(area, &mut buf);
        for cell in buf.content() {
            assert_eq!(cell.symbol(), "#");
        }
    }

    #[test]
    fn snow_is_drawn_on_blank_cells() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 10);
        let settings = EffectsSettings {
            celebration: Duration::from_secs(1),
            snowflakes: Some(20),
        };
        let fx = EffectsController::mount(area, settings, SmallRng::seed_from_u64(5));
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(theme.colors.bg()));
        ParticleLayer::new(&fx, &theme).render(area, &mut buf);
        assert!(buf.content().iter().any(|c| c.symbol() != " "));
    }

    #[test]
    fn particles_skip_cells_with_foreign_background() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 10);
        let settings = EffectsSettings {
            celebration: Duration::from_secs(1),
            snowflakes: Some(60),
        };
        let fx = EffectsController::mount(area, settings, SmallRng::seed_from_u64(5));
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(Color::Rgb(1, 2, 3)));
        ParticleLayer::new(&fx, &theme).render(area, &mut buf);
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }
}
