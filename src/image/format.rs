//! Output formats accepted by `convert`.

use std::fmt;
use std::str::FromStr;

use image::ImageFormat;

use crate::error::PicflipError;

/// Raster output format.
///
/// Parsed case-insensitively from the `convert` format argument.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG format.
    PNG,
    /// JPEG format, spelled `jpg`.
    JPG,
    /// JPEG format, spelled `jpeg`.
    JPEG,
    /// WebP format (lossless).
    WEBP,
}

impl OutputFormat {
    /// All formats, in the order they are listed to the user.
    pub const ALL: [Self; 4] = [Self::PNG, Self::JPG, Self::JPEG, Self::WEBP];

    /// Lowercase name as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::PNG => "png",
            Self::JPG => "jpg",
            Self::JPEG => "jpeg",
            Self::WEBP => "webp",
        }
    }

    /// Codec used to encode this format.
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::PNG => ImageFormat::Png,
            Self::JPG | Self::JPEG => ImageFormat::Jpeg,
            Self::WEBP => ImageFormat::WebP,
        }
    }

    /// Check if the encoded file can carry an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::JPG | Self::JPEG)
    }

    /// Comma-separated list of accepted names, for error messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for OutputFormat {
    type Err = PicflipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == lower)
            .ok_or_else(|| PicflipError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for OutputFormat {
    /// Uppercase label used in status messages (`PNG`, `JPEG`, ...).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}
