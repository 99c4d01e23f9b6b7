use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::effects::controller::EffectsSettings;
use crate::export::RenderOptions;
use crate::prediction::catalog::{Catalog, DEFAULT_LANGUAGE};
use crate::ui::skin::Skin;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_skin")]
    pub skin: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_export_scale")]
    pub export_scale: u32,
    #[serde(default = "default_celebration_ms")]
    pub celebration_ms: u64,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default = "default_snowfall")]
    pub snowfall: bool,
    #[serde(default = "default_snowflakes")]
    pub snowflakes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
}

fn default_skin() -> String {
    Skin::default().as_str().to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_export_dir() -> String {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}
fn default_export_scale() -> u32 {
    2
}
fn default_celebration_ms() -> u64 {
    3000
}
fn default_frame_ms() -> u64 {
    33
}
fn default_snowfall() -> bool {
    true
}
fn default_snowflakes() -> usize {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skin: default_skin(),
            language: default_language(),
            export_dir: default_export_dir(),
            export_scale: default_export_scale(),
            celebration_ms: default_celebration_ms(),
            frame_ms: default_frame_ms(),
            snowfall: default_snowfall(),
            snowflakes: default_snowflakes(),
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Store `skin` as the startup skin in the file at `path`. Everything
    /// else in the file is kept as is, so one-off CLI overrides never end
    /// up persisted. Returns whether the file was written.
    pub fn remember_skin(path: &Path, skin: Skin) -> Result<bool> {
        let mut stored = Self::load_from(path)?;
        if stored.skin() == skin && path.exists() {
            return Ok(false);
        }
        stored.skin = skin.as_str().to_string();
        stored.save_to(path)?;
        Ok(true)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skrynia")
            .join("config.toml")
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skrynia")
    }

    /// Reset values a stale or hand-edited file may carry.
    pub fn normalize(&mut self) {
        if self.skin.parse::<Skin>().is_err() {
            self.skin = default_skin();
        }
        if !Catalog::available_languages().contains(&self.language) {
            self.language = default_language();
        }
        self.export_scale = self.export_scale.clamp(1, 4);
        self.frame_ms = self.frame_ms.clamp(10, 250);
    }

    pub fn skin(&self) -> Skin {
        self.skin.parse().unwrap_or_default()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            quality_scale: self.export_scale.clamp(1, 4),
        }
    }

    pub fn effects_settings(&self) -> EffectsSettings {
        EffectsSettings {
            celebration: Duration::from_millis(self.celebration_ms),
            snowflakes: self.snowfall.then_some(self.snowflakes),
        }
    }

    /// The user catalog when one is configured, otherwise the bundled one for
    /// `language`.
    pub fn catalog(&self) -> crate::error::Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(Path::new(path)),
            None => Catalog::bundled(&self.language),
        }
    }
}
