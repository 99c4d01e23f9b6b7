use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::buffer::Buffer;
use tempfile::TempDir;

use skrynia::error::{Error, Result};
use skrynia::export::adapter::ExportAdapter;
use skrynia::export::sink::ImageSink;
use skrynia::export::{EXPORT_FILENAME, RegionRenderer, RenderOptions};
use skrynia::prediction::PredictionEntry;
use skrynia::prediction::catalog::{Catalog, CatalogStrings};
use skrynia::session::view_state::{Phase, ViewState};
use skrynia::ui::components::render_surface::RenderSurface;
use skrynia::ui::skin::{Skin, SkinPalette};

/// Returns a tagged dump of every cell symbol, so a test can see exactly
/// which frame was captured.
#[derive(Default)]
struct TaggingRenderer {
    calls: Mutex<usize>,
}

impl RegionRenderer for TaggingRenderer {
    fn render_region(&self, region: &Buffer, options: &RenderOptions) -> Result<Vec<u8>> {
        *self.calls.lock().unwrap() += 1;
        let area = region.area;
        let mut out = format!("FRAME {}x{} @{}\n", area.width, area.height, options.quality_scale);
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(region[(x, y)].symbol());
            }
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}

struct BrokenRenderer;

impl RegionRenderer for BrokenRenderer {
    fn render_region(&self, _region: &Buffer, _options: &RenderOptions) -> Result<Vec<u8>> {
        Err(Error::ExportFailure("unsupported content".to_string()))
    }
}

fn strings() -> CatalogStrings {
    CatalogStrings {
        title: "Prediction Chest 2026".to_string(),
        heading: "Prediction 2026".to_string(),
        call_to_action: "Tap the chest".to_string(),
        footer: "Chest of the future".to_string(),
        ..CatalogStrings::default()
    }
}

fn capture(state: &ViewState, catalog: &Catalog) -> Buffer {
    let palette = SkinPalette::load(state.skin());
    RenderSurface::new(state.current(), &palette, catalog.strings()).capture()
}

#[test]
fn closed_export_is_a_deterministic_call_to_action() {
    let dir = TempDir::new().unwrap();
    let renderer = Arc::new(TaggingRenderer::default());
    let adapter = ExportAdapter::new(renderer.clone(), ImageSink::new(dir.path()), RenderOptions::default());
    let catalog = Catalog::new(strings(), vec![PredictionEntry::new("A", "✨")]).unwrap();
    let state = ViewState::new(Skin::Card);

    let first = adapter.render(&capture(&state, &catalog)).unwrap();
    let second = adapter.render(&capture(&state, &catalog)).unwrap();

    assert_eq!(first, second);
    let text = String::from_utf8(first).unwrap();
    assert!(text.starts_with("FRAME 40x22 @2"));
    assert!(text.contains("Tap the chest"));
    assert_eq!(*renderer.calls.lock().unwrap(), 2);
}

#[test]
fn opened_export_captures_prediction_text_and_marker() {
    let dir = TempDir::new().unwrap();
    let adapter = ExportAdapter::new(
        Arc::new(TaggingRenderer::default()),
        ImageSink::new(dir.path()),
        RenderOptions { quality_scale: 1 },
    );
    let catalog = Catalog::new(strings(), vec![PredictionEntry::new("B", "🌟")]).unwrap();
    let mut state = ViewState::new(Skin::Modern);
    let mut rng = SmallRng::seed_from_u64(2026);
    assert!(state.open(&catalog, &mut rng).unwrap());

    let image = adapter.export(&capture(&state, &catalog)).unwrap();

    assert_eq!(image.path, dir.path().join(EXPORT_FILENAME));
    let text = std::fs::read_to_string(&image.path).unwrap();
    assert!(text.starts_with("FRAME 32x26 @1"));
    assert!(text.contains("“B”"));
    assert!(text.contains("🌟"));
}

#[test]
fn export_failure_leaves_view_state_untouched() {
    let dir = TempDir::new().unwrap();
    let adapter = ExportAdapter::new(Arc::new(BrokenRenderer), ImageSink::new(dir.path()), RenderOptions::default());
    let catalog = Catalog::bundled("en").unwrap();
    let mut state = ViewState::new(Skin::Gradient);
    let mut rng = SmallRng::seed_from_u64(5);
    state.open(&catalog, &mut rng).unwrap();
    let before = state.clone();

    let err = adapter.export(&capture(&state, &catalog)).unwrap_err();

    assert!(matches!(err, Error::ExportFailure(_)));
    assert_eq!(state, before);
    assert_eq!(state.phase(), Phase::Opened);
    assert!(!dir.path().join(EXPORT_FILENAME).exists());
}

#[test]
fn full_round_trip_with_bundled_catalog() {
    let catalog = Catalog::bundled("uk").unwrap();
    let mut rng = SmallRng::seed_from_u64(99);
    let mut state = ViewState::new(Skin::Card);

    for _ in 0..25 {
        assert!(state.open(&catalog, &mut rng).unwrap());
        let drawn = state.current().cloned().unwrap();
        assert!(catalog.entries().contains(&drawn));

        state.set_skin(state.skin().next());
        assert_eq!(state.current(), Some(&drawn));

        assert!(state.reset());
        assert!(state.current().is_none());
        assert_eq!(state.phase(), Phase::Closed);
    }
}

#[test]
fn real_png_export_to_disk() {
    let dir = TempDir::new().unwrap();
    let adapter = ExportAdapter::new(
        Arc::new(skrynia::export::png::PngRasterizer),
        ImageSink::new(dir.path().join("pictures")),
        RenderOptions { quality_scale: 1 },
    );
    let catalog = Catalog::bundled("en").unwrap();
    let mut state = ViewState::new(Skin::Classic);
    state.open(&catalog, &mut SmallRng::seed_from_u64(1)).unwrap();

    let image = adapter.export(&capture(&state, &catalog)).unwrap();
    let bytes = std::fs::read(&image.path).unwrap();
    assert_eq!(bytes.len(), image.bytes);
    assert_eq!(&bytes[1..4], b"PNG");
}
