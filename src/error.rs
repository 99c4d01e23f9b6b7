use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Static data or user-supplied input that can never produce a prediction
    /// (empty catalog, malformed catalog file, unknown skin name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The rendering collaborator or the file sink could not produce the image.
    #[error("export failed: {0}")]
    ExportFailure(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ExportFailure(err.to_string())
    }
}

impl Error {
    pub fn is_export_failure(&self) -> bool {
        matches!(self, Error::ExportFailure(_))
    }
}
