use rand::Rng;

use crate::error::Result;
use crate::prediction::PredictionEntry;
use crate::prediction::catalog::Catalog;
use crate::prediction::selector;
use crate::ui::skin::Skin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opened,
}

/// What the chest screen is showing. `current` is `Some` exactly when the
/// phase is `Opened`; the only writers are `open`, `reset` and `set_skin`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    phase: Phase,
    current: Option<PredictionEntry>,
    skin: Skin,
}

impl ViewState {
    pub fn new(skin: Skin) -> Self {
        Self {
            phase: Phase::Closed,
            current: None,
            skin,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&PredictionEntry> {
        self.current.as_ref()
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    /// Draw a prediction and reveal it. Returns `Ok(true)` when the chest was
    /// actually opened; a repeated open is ignored and returns `Ok(false)`.
    pub fn open<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) -> Result<bool> {
        if self.phase == Phase::Opened {
            return Ok(false);
        }
        let entry = selector::select(catalog.entries(), rng)?.clone();
        tracing::info!(marker = %entry.marker, "chest opened");
        self.current = Some(entry);
        self.phase = Phase::Opened;
        Ok(true)
    }

    /// Close the chest again. The skin is kept.
    pub fn reset(&mut self) -> bool {
        if self.phase == Phase::Closed {
            return false;
        }
        self.current = None;
        self.phase = Phase::Closed;
        tracing::info!("chest reset");
        true
    }

    pub fn set_skin(&mut self, skin: Skin) {
        if self.skin != skin {
            tracing::info!(skin = skin.as_str(), "skin changed");
        }
        self.skin = skin;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Skin::default())
    }
}
