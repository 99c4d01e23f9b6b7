pub mod adapter;
pub mod png;
pub mod sink;

use ratatui::buffer::Buffer;

use crate::error::Result;

/// Every export lands under this name; a second export overwrites the first.
pub const EXPORT_FILENAME: &str = "peredbachennya-2026.png";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixel-ratio multiplier applied to the base cell size.
    pub quality_scale: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { quality_scale: 2 }
    }
}

/// Turns a captured region of cells into encoded image bytes.
pub trait RegionRenderer: Send + Sync {
    fn render_region(&self, region: &Buffer, options: &RenderOptions) -> Result<Vec<u8>>;
}
