//! Built-in background remover: LAB color match + border flood fill.

use anyhow::{Context, Result};
use image::DynamicImage;

use crate::image::background::classify::{Thresholds, classify_pixels};
use crate::image::background::fill::clear_border_connected;
use crate::image::background::palette::{estimate_background, to_lab_pixels};
use crate::image::background::{BackgroundRemover, encode_png};

/// Default threshold for color distance in LAB space (ΔE).
const CORE_THRESHOLD: f32 = 10.0;
/// Extended threshold for anti-aliased edge pixels.
const FRINGE_THRESHOLD: f32 = 25.0;
/// Pixels with alpha below this value are not reclassified.
///
/// 1 lets a semi-transparent background be removed as long as it touches the border.
const MIN_PROCESS_ALPHA: u8 = 1;

/// Removes a flat or near-flat background that touches the image border.
///
/// Works well for product shots, logos and screenshots; subjects on busy
/// photographic backgrounds need the segmentation model instead.
#[derive(Debug, Clone, Copy)]
pub struct EdgeFloodRemover {
    thresholds: Thresholds,
}

impl Default for EdgeFloodRemover {
    fn default() -> Self {
        Self {
            thresholds: Thresholds {
                core: CORE_THRESHOLD,
                fringe: FRINGE_THRESHOLD,
                min_alpha: MIN_PROCESS_ALPHA,
            },
        }
    }
}

impl EdgeFloodRemover {
    /// Clear the border-connected background of a decoded image.
    pub fn process(&self, img: DynamicImage) -> DynamicImage {
        let mut rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return DynamicImage::ImageRgba8(rgba);
        }

        let background = estimate_background(&rgba);
        crate::debug!("remove"; "estimated background LAB({:.1}, {:.1}, {:.1})",
            background.l, background.a, background.b);

        let labs = to_lab_pixels(&rgba);
        let classes = classify_pixels(&rgba, &labs, &background, self.thresholds);
        clear_border_connected(&mut rgba, &classes);

        DynamicImage::ImageRgba8(rgba)
    }
}

impl BackgroundRemover for EdgeFloodRemover {
    fn name(&self) -> &'static str {
        "edge-flood"
    }

    fn remove(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(input).context("failed to decode input image")?;
        encode_png(&self.process(img))
    }
}
