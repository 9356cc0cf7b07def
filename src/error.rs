//! Error types shared by the `remove` and `convert` handlers.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::image::OutputFormat;

// ============================================================================
// PicflipError
// ============================================================================

/// Everything a handler can fail with.
///
/// Handlers never let these escape to the process exit code; they are printed
/// as a `✘` status line instead.
#[derive(Debug, Error)]
pub enum PicflipError {
    #[error("Unsupported output format. Supported formats are: {}", OutputFormat::supported_list())]
    UnsupportedFormat(String),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[cfg_attr(feature = "svg", allow(dead_code))]
    #[error(
        "picflip was built without SVG support! Reinstall it with: cargo install picflip --features svg"
    )]
    SvgUnsupported,

    // NOTE: the io::Error is shown inline instead of via source() so the single
    // status line carries the cause.
    #[error("{err} ({})", path.display())]
    Io { path: PathBuf, err: io::Error },

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[cfg_attr(not(feature = "svg"), allow(dead_code))]
    #[error("SVG rendering failed: {0}")]
    Svg(String),

    #[error("{0:#}")]
    Backend(anyhow::Error),
}

impl PicflipError {
    /// Wrap an I/O error for `path`, mapping `NotFound` to [`Self::InputNotFound`].
    pub fn io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::InputNotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                err,
            }
        }
    }

    /// Check if this is a missing-input error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::InputNotFound(_) => true,
            Self::Image(image::ImageError::IoError(e)) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl From<anyhow::Error> for PicflipError {
    fn from(err: anyhow::Error) -> Self {
        Self::Backend(err)
    }
}

pub type Result<T, E = PicflipError> = std::result::Result<T, E>;
