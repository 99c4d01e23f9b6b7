use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ratatui::buffer::Buffer;

use crate::error::Result;
use crate::export::sink::ImageSink;
use crate::export::{RegionRenderer, RenderOptions};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Boundary between the captured render surface and the image file. It only
/// ever sees an owned snapshot of cells, so it cannot touch the view state.
#[derive(Clone)]
pub struct ExportAdapter {
    renderer: Arc<dyn RegionRenderer>,
    sink: ImageSink,
    options: RenderOptions,
}

impl ExportAdapter {
    pub fn new(renderer: Arc<dyn RegionRenderer>, sink: ImageSink, options: RenderOptions) -> Self {
        Self {
            renderer,
            sink,
            options,
        }
    }

    pub fn sink(&self) -> &ImageSink {
        &self.sink
    }

    pub fn render(&self, region: &Buffer) -> Result<Vec<u8>> {
        self.renderer.render_region(region, &self.options)
    }

    /// Render and write. Failures are logged here and handed back to the
    /// caller unchanged; nothing is retried.
    pub fn export(&self, region: &Buffer) -> Result<ExportedImage> {
        let result = self.render(region).and_then(|bytes| {
            let path = self.sink.write(&bytes)?;
            Ok(ExportedImage {
                path,
                bytes: bytes.len(),
            })
        });
        match &result {
            Ok(image) => tracing::info!(path = %image.path.display(), bytes = image.bytes, "image exported"),
            Err(e) => tracing::error!("error generating image: {e}"),
        }
        result
    }

    /// Run `export` on a worker thread and report through `on_done`. Two
    /// exports in flight simply race for the same file.
    pub fn spawn<F>(&self, region: Buffer, on_done: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<ExportedImage>) + Send + 'static,
    {
        let adapter = self.clone();
        thread::spawn(move || on_done(adapter.export(&region)))
    }
}
