use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::export::EXPORT_FILENAME;

/// Writes exported images into a directory under the fixed export filename.
#[derive(Clone, Debug)]
pub struct ImageSink {
    dir: PathBuf,
}

impl ImageSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn target_path(&self) -> PathBuf {
        self.dir.join(EXPORT_FILENAME)
    }

    /// Write through a private temp file in the same directory and rename it
    /// over the target. Concurrent writers each get their own temp file, so
    /// the last rename wins and the target is always a complete image. A
    /// failed write removes its temp file when it is dropped.
    pub fn write(&self, bytes: &[u8]) -> Result<PathBuf> {
        let fail = |e: std::io::Error| Error::ExportFailure(format!("{}: {e}", self.dir.display()));

        fs::create_dir_all(&self.dir).map_err(fail)?;
        let path = self.target_path();

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(fail)?;
        tmp.write_all(bytes).map_err(fail)?;
        tmp.as_file().sync_all().map_err(fail)?;
        tmp.persist(&path).map_err(|e| fail(e.error))?;
        Ok(path)
    }
}
