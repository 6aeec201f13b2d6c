use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl DeckError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckError::Io { path: path.into(), source }
    }

    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        DeckError::Decode { path: path.into(), source }
    }
}
