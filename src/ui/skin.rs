use std::fs;
use std::str::FromStr;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ui::theme::parse_color;

#[derive(Embed)]
#[folder = "assets/skins/"]
struct SkinAssets;

/// Visual presentation of the render surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Skin {
    #[default]
    Card,
    Modern,
    Classic,
    Gradient,
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Card, Skin::Modern, Skin::Classic, Skin::Gradient];

    pub fn as_str(self) -> &'static str {
        match self {
            Skin::Card => "card",
            Skin::Modern => "modern",
            Skin::Classic => "classic",
            Skin::Gradient => "gradient",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    pub fn from_digit(ch: char) -> Option<Self> {
        let idx = ch.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl FromStr for Skin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skin::ALL
            .into_iter()
            .find(|skin| skin.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unknown skin '{s}'")))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinShape {
    #[default]
    Card,
    Phone,
}

impl SkinShape {
    /// Fixed capture size in cells; the exported image uses the same geometry.
    pub fn size(self) -> (u16, u16) {
        match self {
            SkinShape::Card => (40, 22),
            SkinShape::Phone => (32, 26),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinPalette {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub shape: SkinShape,
    pub colors: SkinColors,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinColors {
    pub background: String,
    pub glow: String,
    pub frame: String,
    pub heading: String,
    pub text: String,
    pub accent: String,
    pub muted: String,
}

impl SkinPalette {
    /// User skins in `config_dir/skrynia/skins/` override the bundled ones.
    pub fn load(skin: Skin) -> Self {
        let filename = format!("{}.toml", skin.as_str());

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("skrynia").join("skins").join(&filename);
            if let Ok(content) = fs::read_to_string(&user_path) {
                match toml::from_str::<SkinPalette>(&content) {
                    Ok(palette) => return palette,
                    Err(e) => tracing::warn!(path = %user_path.display(), "ignoring skin override: {e}"),
                }
            }
        }

        SkinAssets::get(&filename)
            .and_then(|file| {
                std::str::from_utf8(file.data.as_ref())
                    .ok()
                    .and_then(|content| toml::from_str::<SkinPalette>(content).ok())
            })
            .unwrap_or_else(|| Self::fallback(skin))
    }

    pub fn load_all() -> Vec<SkinPalette> {
        Skin::ALL.into_iter().map(Self::load).collect()
    }

    fn fallback(skin: Skin) -> Self {
        Self {
            name: skin.as_str().to_string(),
            label: skin.as_str().to_string(),
            shape: if skin == Skin::Card { SkinShape::Card } else { SkinShape::Phone },
            colors: SkinColors::default(),
        }
    }
}

impl Default for SkinColors {
    fn default() -> Self {
        Self {
            background: "#2a1f4a".to_string(),
            glow: "#3b1d5e".to_string(),
            frame: "#e0c060".to_string(),
            heading: "#fff3c4".to_string(),
            text: "#ffffff".to_string(),
            accent: "#facc15".to_string(),
            muted: "#c9b77a".to_string(),
        }
    }
}

impl SkinColors {
    pub fn background(&self) -> Color { parse_color(&self.background) }
    pub fn glow(&self) -> Color { parse_color(&self.glow) }
    pub fn frame(&self) -> Color { parse_color(&self.frame) }
    pub fn heading(&self) -> Color { parse_color(&self.heading) }
    pub fn text(&self) -> Color { parse_color(&self.text) }
    pub fn accent(&self) -> Color { parse_color(&self.accent) }
    pub fn muted(&self) -> Color { parse_color(&self.muted) }
}
