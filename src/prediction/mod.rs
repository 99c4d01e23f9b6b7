pub mod catalog;
pub mod selector;

use serde::{Deserialize, Serialize};

/// One prediction: the sentence shown on the card and the glyph drawn above it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub text: String,
    pub marker: String,
}

impl PredictionEntry {
    pub fn new(text: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marker: marker.into(),
        }
    }
}
