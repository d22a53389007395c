use std::path::PathBuf;
use config::OutputFormat;
use image::{ImageError, ImageFormat};
use thiserror::Error;


/// Failures of a single compose call.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("{}: input image not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("{}: failed to read input image: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: not a recognized image format", .0.display())]
    Unrecognized(PathBuf),

    #[error("{}: no {format:?} decoder in this build", path.display())]
    MissingCodec {
        path: PathBuf,
        format: ImageFormat,
    },

    #[error("{}: failed to decode image: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("{}: image has no pixels ({width}x{height})", path.display())]
    Empty {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("{}: failed to encode {format} image: {source}", path.display())]
    Encode {
        path: PathBuf,
        format: OutputFormat,
        #[source]
        source: ImageError,
    },

    #[error("{}: failed to write image: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ComposeError {
    pub fn is_missing_codec(&self) -> bool {
        matches!(self, ComposeError::MissingCodec { .. })
    }
}

/// Outcome of a run that stopped before every target was written.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Source image {} does not exist, nothing written", .0.display())]
    MissingInput(PathBuf),

    #[error("Cannot write {}: {source}. Enable the matching `image` crate feature and rebuild", target.display())]
    MissingCodec {
        target: PathBuf,
        #[source]
        source: ComposeError,
    },

    #[error("Cannot write {}: {source}", target.display())]
    Failed {
        target: PathBuf,
        #[source]
        source: ComposeError,
    },
}

impl RunError {
    pub fn from_target(target: PathBuf, source: ComposeError) -> Self {
        match source.is_missing_codec() {
            true => RunError::MissingCodec { target, source },
            false => RunError::Failed { target, source },
        }
    }
}
