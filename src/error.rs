use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("box is inverted: min edge lies past max edge")]
    InvertedBox,

    #[error("box has zero width or height")]
    DegenerateBox,

    #[error("rectangle exceeds the {width}x{height} image")]
    OutOfBounds { width: u32, height: u32 },

    #[error("normalized coordinates must lie in [0, 1]")]
    NotNormalized,

    #[error("font file {path} not found")]
    FontNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("font file {0} could not be parsed")]
    InvalidFont(PathBuf),

    #[error("no built-in fallback font available")]
    NoBuiltinFont,

    #[error("input unavailable: {0}")]
    InputUnavailable(String),

    #[error("no input image selected")]
    NoInputImage,

    #[error("window error: {0}")]
    Window(String),

    #[error("session worker panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AnnotateError {
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            Self::ZeroDimension { .. }
                | Self::InvertedBox
                | Self::DegenerateBox
                | Self::OutOfBounds { .. }
                | Self::NotNormalized
        )
    }
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
