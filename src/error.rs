use image::{ColorType, ImageError, ImageFormat};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a single image could not be scrubbed
#[derive(Debug, Error)]
pub enum ScrubError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not determine image format")]
    UnknownFormat,

    #[error("failed to decode image")]
    Decode(#[source] ImageError),

    #[error("unsupported pixel layout {0:?}")]
    UnsupportedLayout(ColorType),

    #[error("failed to encode {format:?} image")]
    Encode {
        format: ImageFormat,
        #[source]
        source: ImageError,
    },

    #[error("failed to write scrubbed image")]
    Write(#[source] io::Error),

    #[error("failed to read EXIF metadata: {0}")]
    Exif(String),

    #[error("EXIF metadata still present after re-encode ({0} fields)")]
    ResidualMetadata(usize),

    #[error("{0:?} codec is not available in this build")]
    CodecUnavailable(ImageFormat),
}
