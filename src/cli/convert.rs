//! `convert` command.

use std::path::Path;

use crate::error::{PicflipError, Result};
use crate::image::OutputFormat;
use crate::image::convert::convert_raster;
use crate::image::svg::{is_svg, rasterize_to_png};
use crate::logger::{status_error, status_hint, status_success};

/// What a successful conversion did, for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converted {
    /// SVG rasterized to PNG (the requested format is not used).
    SvgToPng,
    /// Raster re-encoded; `source` is the uppercased input extension.
    Raster {
        source: String,
        target: OutputFormat,
    },
}

/// Convert `input` to `format` and save it to `output`.
///
/// Failures are printed and swallowed; the process still exits 0.
pub fn convert_image(input: &Path, output: &Path, format: &str) {
    match try_convert(input, output, format) {
        Ok(Converted::SvgToPng) => {
            status_success(&format!("Converted SVG to PNG: {}", output.display()));
        }
        Ok(Converted::Raster { source, target }) => {
            status_success(&format!(
                "Converted {source} to {target}: {}",
                output.display()
            ));
        }
        Err(e @ PicflipError::SvgUnsupported) => status_hint(&e.to_string()),
        Err(e @ PicflipError::UnsupportedFormat(_)) => status_error(&e.to_string()),
        Err(e) if e.is_not_found() => {
            status_error(&format!("Input file not found: {}", input.display()));
        }
        Err(e) => status_error(&format!("Error converting image: {e}")),
    }
}

/// Validate the format, then rasterize (SVG) or re-encode (everything else).
pub fn try_convert(input: &Path, output: &Path, format: &str) -> Result<Converted> {
    let target: OutputFormat = format.parse()?;

    if is_svg(input) {
        if target != OutputFormat::PNG {
            crate::debug!("convert"; "SVG input always produces PNG, ignoring `{}`", format);
        }
        rasterize_to_png(input, output)?;
        return Ok(Converted::SvgToPng);
    }

    convert_raster(input, output, target)?;
    Ok(Converted::Raster {
        source: source_label(input),
        target,
    })
}

/// Uppercased extension of the input, empty when there is none.
fn source_label(input: &Path) -> String {
    input
        .extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}
