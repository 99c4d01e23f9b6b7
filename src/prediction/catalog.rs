use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prediction::PredictionEntry;

#[derive(Embed)]
#[folder = "assets/catalogs/"]
struct CatalogAssets;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Localized labels that travel with a catalog, so the card and the controls
/// around it read in one language. Labels a catalog leaves out fall back to
/// English.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogStrings {
    pub title: String,
    pub heading: String,
    pub call_to_action: String,
    pub footer: String,
    pub open_label: String,
    pub save_label: String,
    pub again_label: String,
    pub skin_label: String,
    pub quit_label: String,
    pub saving: String,
    pub saved: String,
    pub save_failed: String,
}

impl Default for CatalogStrings {
    fn default() -> Self {
        Self {
            title: "Prediction Chest".to_string(),
            heading: "Prediction".to_string(),
            call_to_action: "Open the chest".to_string(),
            footer: String::new(),
            open_label: "Open".to_string(),
            save_label: "Save image".to_string(),
            again_label: "Again".to_string(),
            skin_label: "Skin".to_string(),
            quit_label: "Quit".to_string(),
            saving: "Saving image...".to_string(),
            saved: "Saved".to_string(),
            save_failed: "Could not save image".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    strings: CatalogStrings,
    #[serde(default)]
    predictions: Vec<PredictionEntry>,
}

/// Immutable, non-empty list of predictions. Construction is the only place
/// the non-empty invariant is checked; nothing mutates a catalog afterwards.
#[derive(Clone, Debug)]
pub struct Catalog {
    strings: CatalogStrings,
    entries: Vec<PredictionEntry>,
}

impl Catalog {
    pub fn new(strings: CatalogStrings, entries: Vec<PredictionEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidInput("catalog has no predictions".to_string()));
        }
        if let Some(idx) = entries
            .iter()
            .position(|e| e.text.trim().is_empty() || e.marker.trim().is_empty())
        {
            return Err(Error::InvalidInput(format!(
                "prediction #{} has an empty text or marker",
                idx + 1
            )));
        }
        Ok(Self { strings, entries })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| Error::InvalidInput(e.to_string()))?;
        Self::new(file.strings, file.predictions)
    }

    /// Bundled catalog for `language`, falling back to the default language.
    pub fn bundled(language: &str) -> Result<Self> {
        let file = CatalogAssets::get(&format!("{language}.toml"))
            .or_else(|| CatalogAssets::get(&format!("{DEFAULT_LANGUAGE}.toml")))
            .ok_or_else(|| Error::InvalidInput("no bundled catalog".to_string()))?;
        let content = std::str::from_utf8(file.data.as_ref())
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        Self::from_toml(content)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::InvalidInput(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn available_languages() -> Vec<String> {
        let mut langs: Vec<String> = CatalogAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        langs.sort();
        langs
    }

    pub fn entries(&self) -> &[PredictionEntry] {
        &self.entries
    }

    pub fn strings(&self) -> &CatalogStrings {
        &self.strings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalogs_load_and_are_non_empty() {
        for lang in Catalog::available_languages() {
            let catalog = Catalog::bundled(&lang).unwrap();
            assert!(!catalog.is_empty(), "{lang} catalog is empty");
            assert!(!catalog.strings().title.is_empty());
        }
    }

    #[test]
    fn unknown_language_falls_back_to_default() {
        let fallback = Catalog::bundled("tlh").unwrap();
        let default = Catalog::bundled(DEFAULT_LANGUAGE).unwrap();
        assert_eq!(fallback.entries(), default.entries());
    }

    #[test]
    fn empty_catalog_is_invalid_input() {
        let err = Catalog::new(CatalogStrings::default(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn blank_marker_is_rejected() {
        let err = Catalog::new(
            CatalogStrings::default(),
            vec![PredictionEntry::new("A", "✨"), PredictionEntry::new("B", " ")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn from_toml_without_strings_uses_defaults() {
        let toml_str = r#"
[[predictions]]
text = "A"
marker = "✨"
"#;
        let catalog = Catalog::from_toml(toml_str).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.strings(), &CatalogStrings::default());
    }

    #[test]
    fn partial_strings_keep_default_labels() {
        let toml_str = r#"
[strings]
title = "Скриня"
save_label = "Зберегти"

[[predictions]]
text = "A"
marker = "✨"
"#;
        let strings = Catalog::from_toml(toml_str).unwrap().strings().clone();
        assert_eq!(strings.title, "Скриня");
        assert_eq!(strings.save_label, "Зберегти");
        assert_eq!(strings.again_label, CatalogStrings::default().again_label);
    }

    #[test]
    fn ukrainian_catalog_translates_controls() {
        let uk = Catalog::bundled("uk").unwrap();
        let en = Catalog::bundled("en").unwrap();
        assert_eq!(uk.strings().save_label, "Зберегти");
        assert_eq!(uk.strings().again_label, "Ще раз");
        assert_ne!(uk.strings().quit_label, en.strings().quit_label);
        assert_ne!(uk.strings().saving, en.strings().saving);
    }

    #[test]
    fn from_toml_reports_parse_errors_as_invalid_input() {
        let err = Catalog::from_toml("predictions = 3").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn duplicate_texts_are_allowed() {
        let catalog = Catalog::new(
            CatalogStrings::default(),
            vec![PredictionEntry::new("A", "✨"), PredictionEntry::new("A", "🌟")],
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
