use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::Rect;

use crate::config::Config;
use crate::effects::controller::EffectsController;
use crate::error::Result;
use crate::event::AppEvent;
use crate::export::adapter::{ExportAdapter, ExportedImage};
use crate::export::png::PngRasterizer;
use crate::export::sink::ImageSink;
use crate::export::RegionRenderer;
use crate::prediction::catalog::Catalog;
use crate::session::view_state::ViewState;
use crate::ui::components::render_surface::RenderSurface;
use crate::ui::skin::{Skin, SkinPalette};
use crate::ui::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// The single writer of `ViewState`. Effects and exports only ever get a
/// read-only view or an owned snapshot.
pub struct App {
    pub view: ViewState,
    pub catalog: Catalog,
    pub palettes: Vec<SkinPalette>,
    pub theme: Theme,
    pub config: Config,
    pub effects: EffectsController,
    pub exporter: ExportAdapter,
    pub status: Option<StatusMessage>,
    pub exports_in_flight: usize,
    pub frame: u64,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, catalog: Catalog, area: Rect) -> Self {
        let renderer: Arc<dyn RegionRenderer> = Arc::new(PngRasterizer);
        Self::with_parts(config, catalog, area, renderer, SmallRng::from_entropy())
    }

    /// Build with an explicit renderer and RNG; tests use this to swap in a
    /// deterministic renderer and seed.
    pub fn with_parts(
        config: Config,
        catalog: Catalog,
        area: Rect,
        renderer: Arc<dyn RegionRenderer>,
        mut rng: SmallRng,
    ) -> Self {
        let effects_rng = SmallRng::from_rng(&mut rng).unwrap_or_else(|_| SmallRng::seed_from_u64(0));
        let effects = EffectsController::mount(area, config.effects_settings(), effects_rng);
        let exporter = ExportAdapter::new(
            renderer,
            ImageSink::new(&config.export_dir),
            config.render_options(),
        );
        Self {
            view: ViewState::new(config.skin()),
            catalog,
            palettes: SkinPalette::load_all(),
            theme: Theme::default(),
            effects,
            exporter,
            status: None,
            exports_in_flight: 0,
            frame: 0,
            should_quit: false,
            rng,
            config,
        }
    }

    pub fn palette(&self) -> &SkinPalette {
        &self.palettes[self.view.skin().index()]
    }

    pub fn surface(&self) -> RenderSurface<'_> {
        RenderSurface::new(self.view.current(), self.palette(), self.catalog.strings())
    }

    pub fn open(&mut self, now: Instant) {
        match self.view.open(&self.catalog, &mut self.rng) {
            Ok(true) => {
                self.status = None;
                self.effects.celebrate(now);
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!("could not draw a prediction: {e}");
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    pub fn reset(&mut self) {
        if self.view.reset() {
            self.status = None;
        }
    }

    pub fn set_skin(&mut self, skin: Skin) {
        self.view.set_skin(skin);
    }

    pub fn next_skin(&mut self) {
        self.set_skin(self.view.skin().next());
    }

    pub fn prev_skin(&mut self) {
        self.set_skin(self.view.skin().prev());
    }

    /// Capture the surface as it looks right now and hand it to a worker.
    /// The result arrives later as `AppEvent::ExportFinished`.
    pub fn request_export(&mut self, tx: Sender<AppEvent>) -> JoinHandle<()> {
        let snapshot = self.surface().capture();
        self.exports_in_flight += 1;
        self.status = Some(StatusMessage::ok(self.catalog.strings().saving.clone()));
        self.exporter.spawn(snapshot, move |result| {
            let _ = tx.send(AppEvent::ExportFinished(result));
        })
    }

    pub fn on_export_finished(&mut self, result: Result<ExportedImage>) {
        self.exports_in_flight = self.exports_in_flight.saturating_sub(1);
        let strings = self.catalog.strings();
        self.status = Some(match result {
            Ok(image) => StatusMessage::ok(format!("{} {}", strings.saved, image.path.display())),
            // already logged by the adapter
            Err(e) => StatusMessage::error(format!("{}: {e}", strings.save_failed)),
        });
    }

    pub fn tick(&mut self, now: Instant) {
        self.frame = self.frame.wrapping_add(1);
        self.effects.tick(now);
    }

    pub fn resize(&mut self, area: Rect) {
        self.effects.resize(area);
    }

    pub fn quit(&mut self) {
        self.effects.unmount();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::export::RenderOptions;
    use crate::prediction::PredictionEntry;
    use crate::prediction::catalog::CatalogStrings;
    use crate::session::view_state::Phase;
    use ratatui::buffer::Buffer;
    use std::sync::mpsc;
    use std::time::Duration;
    use tempfile::TempDir;

    struct Failing;

    impl RegionRenderer for Failing {
        fn render_region(&self, _: &Buffer, _: &RenderOptions) -> Result<Vec<u8>> {
            Err(Error::ExportFailure("transient fault".to_string()))
        }
    }

    fn test_app(renderer: Arc<dyn RegionRenderer>, dir: &TempDir) -> App {
        let config = Config {
            export_dir: dir.path().to_string_lossy().to_string(),
            snowfall: false,
            ..Config::default()
        };
        let catalog = Catalog::new(CatalogStrings::default(), vec![PredictionEntry::new("A", "✨")]).unwrap();
        App::with_parts(config, catalog, Rect::new(0, 0, 80, 24), renderer, SmallRng::seed_from_u64(1))
    }

    #[test]
    fn open_starts_celebration_only_on_transition() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(Arc::new(PngRasterizer), &dir);
        let now = Instant::now();

        app.open(now);
        assert!(app.effects.is_celebrating());
        assert_eq!(app.view.current(), Some(&PredictionEntry::new("A", "✨")));

        app.tick(now + Duration::from_secs(4));
        assert!(!app.effects.is_celebrating());
        app.open(now + Duration::from_secs(5));
        assert!(!app.effects.is_celebrating());
    }

    #[test]
    fn failed_export_keeps_view_state_and_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(Arc::new(Failing), &dir);
        app.open(Instant::now());
        let before = app.view.clone();

        let (tx, rx) = mpsc::channel();
        app.request_export(tx).join().unwrap();
        match rx.recv().unwrap() {
            AppEvent::ExportFinished(result) => app.on_export_finished(result),
            _ => panic!("unexpected event"),
        }

        assert_eq!(app.view, before);
        assert_eq!(app.view.phase(), Phase::Opened);
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("transient fault"));
        assert_eq!(app.exports_in_flight, 0);
    }

    #[test]
    fn successful_export_writes_png() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(Arc::new(PngRasterizer), &dir);
        app.open(Instant::now());

        let (tx, rx) = mpsc::channel();
        app.request_export(tx).join().unwrap();
        if let AppEvent::ExportFinished(result) = rx.recv().unwrap() {
            app.on_export_finished(result);
        }

        let path = app.exporter.sink().target_path();
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        assert!(!app.status.unwrap().is_error);
    }

    #[test]
    fn skin_cycling_survives_reset() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(Arc::new(PngRasterizer), &dir);
        app.open(Instant::now());
        app.next_skin();
        app.next_skin();
        app.reset();
        assert_eq!(app.view.skin(), Skin::Classic);
        assert_eq!(app.view.phase(), Phase::Closed);
        app.prev_skin();
        assert_eq!(app.view.skin(), Skin::Modern);
    }

    #[test]
    fn overlapping_exports_both_succeed() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(Arc::new(PngRasterizer), &dir);
        app.open(Instant::now());

        let (tx, rx) = mpsc::channel();
        let first = app.request_export(tx.clone());
        let second = app.request_export(tx);
        assert_eq!(app.exports_in_flight, 2);
        first.join().unwrap();
        second.join().unwrap();

        for _ in 0..2 {
            match rx.recv().unwrap() {
                AppEvent::ExportFinished(result) => {
                    assert!(result.is_ok(), "{result:?}");
                    app.on_export_finished(result);
                }
                _ => panic!("unexpected event"),
            }
        }

        assert_eq!(app.exports_in_flight, 0);
        let status = app.status.clone().unwrap();
        assert!(!status.is_error);
        assert!(status.text.starts_with(&app.catalog.strings().saved));
        let bytes = std::fs::read(app.exporter.sink().target_path()).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn open_and_reset_during_celebration_leave_animation_alone() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(Arc::new(PngRasterizer), &dir);
        let t0 = Instant::now();
        let at = |ms: u64| t0 + Duration::from_millis(ms);

        app.open(t0);
        app.tick(at(1000));
        assert!(app.effects.is_celebrating());
        assert!(!app.effects.confetti().is_empty());
        let opened = app.view.clone();

        app.open(at(1500));
        assert_eq!(app.view, opened);
        assert!(app.effects.is_celebrating());

        app.reset();
        assert_eq!(app.view.phase(), Phase::Closed);
        let closed = app.view.clone();

        app.tick(at(2500));
        assert!(app.effects.is_celebrating(), "reset must not stop the fireworks");
        assert_eq!(app.view, closed);

        // the original deadline still holds: the second open did not restart it
        app.tick(at(3100));
        assert!(!app.effects.is_celebrating());
        assert_eq!(app.view, closed);
        assert!(app.view.current().is_none());
    }
}
