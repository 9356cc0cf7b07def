//! SVG rasterization.
//!
//! Renders an SVG file to PNG with `resvg`. Compiled only with the `svg`
//! feature; without it [`rasterize_to_png`] reports [`PicflipError::SvgUnsupported`].

use std::path::Path;

use crate::error::{PicflipError, Result};

/// Check if `path` names an SVG file (by extension, case-insensitive).
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Render the SVG at `input` at its natural size (96 DPI) and write a PNG to `output`.
#[cfg(feature = "svg")]
pub fn rasterize_to_png(input: &Path, output: &Path) -> Result<()> {
    let png = render_png(input)?;
    std::fs::write(output, png).map_err(|e| PicflipError::io(output, e))
}

#[cfg(not(feature = "svg"))]
pub fn rasterize_to_png(_input: &Path, _output: &Path) -> Result<()> {
    Err(PicflipError::SvgUnsupported)
}

/// Parse and render to PNG bytes.
#[cfg(feature = "svg")]
fn render_png(input: &Path) -> Result<Vec<u8>> {
    use resvg::tiny_skia;

    let data = std::fs::read(input).map_err(|e| PicflipError::io(input, e))?;

    // Relative <image href> references resolve against the SVG's directory
    let mut options = usvg::Options {
        resources_dir: input.parent().map(Path::to_path_buf),
        ..Default::default()
    };
    // <text> is dropped without any font in the database
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_data(&data, &options)
        .map_err(|e| PicflipError::Svg(format!("failed to parse SVG: {e}")))?;

    let size = tree.size().to_int_size();
    crate::debug!("svg"; "rendering {} at {}x{}", input.display(), size.width(), size.height());

    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        PicflipError::Svg(format!(
            "invalid SVG dimensions: {}x{}",
            size.width(),
            size.height()
        ))
    })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| PicflipError::Svg(format!("failed to encode PNG: {e}")))
}
