use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

/// Colors of the screen around the render surface (title, chest, snow, footer).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub title: String,
    pub muted: String,
    pub accent: String,
    pub chest_body: String,
    pub chest_band: String,
    pub chest_lid: String,
    pub chest_lock: String,
    pub snow: String,
    pub status_ok: String,
    pub status_error: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("skrynia")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("festive-night").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0f0c29".to_string(),
            fg: "#e8e4ff".to_string(),
            title: "#fde68a".to_string(),
            muted: "#7c7aa8".to_string(),
            accent: "#facc15".to_string(),
            chest_body: "#b8860b".to_string(),
            chest_band: "#4a3b18".to_string(),
            chest_lid: "#ffd700".to_string(),
            chest_lock: "#fff3c4".to_string(),
            snow: "#dfe7ff".to_string(),
            status_ok: "#a6e3a1".to_string(),
            status_error: "#f38ba8".to_string(),
        }
    }
}

pub fn parse_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }
    Color::White
}

impl ThemeColors {
    pub fn bg(&self) -> Color { parse_color(&self.bg) }
    pub fn fg(&self) -> Color { parse_color(&self.fg) }
    pub fn title(&self) -> Color { parse_color(&self.title) }
    pub fn muted(&self) -> Color { parse_color(&self.muted) }
    pub fn accent(&self) -> Color { parse_color(&self.accent) }
    pub fn chest_body(&self) -> Color { parse_color(&self.chest_body) }
    pub fn chest_band(&self) -> Color { parse_color(&self.chest_band) }
    pub fn chest_lid(&self) -> Color { parse_color(&self.chest_lid) }
    pub fn chest_lock(&self) -> Color { parse_color(&self.chest_lock) }
    pub fn snow(&self) -> Color { parse_color(&self.snow) }
    pub fn status_ok(&self) -> Color { parse_color(&self.status_ok) }
    pub fn status_error(&self) -> Color { parse_color(&self.status_error) }
}
