//! Per-pixel background classification.

use image::RgbaImage;
use lab::Lab;
use rayon::prelude::*;

use crate::image::background::palette::delta_e_sq;

/// Images with at least this many pixels are classified on the rayon pool.
const PARALLEL_MIN_PIXELS: usize = 32 * 1024;

/// How close a pixel is to the background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PixelClass {
    /// Part of the subject; never touched.
    Subject,
    /// Anti-aliased edge; alpha is reduced to the stored value.
    Fringe(u8),
    /// Background; alpha becomes zero.
    Background,
}

impl PixelClass {
    /// Whether a flood fill may pass through this pixel.
    #[inline]
    pub(super) fn is_fillable(self) -> bool {
        !matches!(self, Self::Subject)
    }
}

/// ΔE thresholds controlling classification.
#[derive(Debug, Clone, Copy)]
pub(super) struct Thresholds {
    /// At or below this distance a pixel is background.
    pub(super) core: f32,
    /// Between `core` and this distance a pixel is a fringe pixel.
    pub(super) fringe: f32,
    /// Pixels with alpha below this are left alone.
    pub(super) min_alpha: u8,
}

impl Thresholds {
    #[inline]
    fn classify(&self, background: &Lab, lab: &Lab, alpha: u8) -> PixelClass {
        if alpha < self.min_alpha {
            return PixelClass::Subject;
        }

        let dist_sq = delta_e_sq(lab, background);
        if dist_sq <= self.core * self.core {
            PixelClass::Background
        } else if dist_sq <= self.fringe * self.fringe {
            // Linear ramp: just outside `core` is nearly transparent,
            // just inside `fringe` keeps nearly all of its alpha.
            let span = (self.fringe - self.core).max(f32::EPSILON);
            let ratio = ((dist_sq.sqrt() - self.core) / span).clamp(0.0, 1.0);
            PixelClass::Fringe((f32::from(alpha) * ratio).round() as u8)
        } else {
            PixelClass::Subject
        }
    }
}

/// Classify every pixel of `img` against `background`.
///
/// `labs` must hold one entry per pixel in row-major order.
pub(super) fn classify_pixels(
    img: &RgbaImage,
    labs: &[Lab],
    background: &Lab,
    thresholds: Thresholds,
) -> Vec<PixelClass> {
    let raw = img.as_raw();
    debug_assert_eq!(labs.len() * 4, raw.len());

    let classify = |(lab, px): (&Lab, &[u8])| thresholds.classify(background, lab, px[3]);

    if labs.len() >= PARALLEL_MIN_PIXELS {
        labs.par_iter()
            .zip(raw.par_chunks_exact(4))
            .map(classify)
            .collect()
    } else {
        labs.iter().zip(raw.chunks_exact(4)).map(classify).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const THRESHOLDS: Thresholds = Thresholds {
        core: 10.0,
        fringe: 25.0,
        min_alpha: 1,
    };

    fn classify_one(rgb: [u8; 3], alpha: u8, background: [u8; 3]) -> PixelClass {
        let img = RgbaImage::from_pixel(1, 1, Rgba([rgb[0], rgb[1], rgb[2], alpha]));
        let labs = vec![Lab::from_rgb(&rgb)];
        classify_pixels(&img, &labs, &Lab::from_rgb(&background), THRESHOLDS)[0]
    }

    #[test]
    fn identical_color_is_background() {
        assert_eq!(
            classify_one([250, 250, 250], 255, [250, 250, 250]),
            PixelClass::Background
        );
    }

    #[test]
    fn distant_color_is_subject() {
        assert_eq!(
            classify_one([0, 0, 0], 255, [255, 255, 255]),
            PixelClass::Subject
        );
    }

    #[test]
    fn transparent_pixel_is_left_alone() {
        assert_eq!(
            classify_one([255, 255, 255], 0, [255, 255, 255]),
            PixelClass::Subject
        );
    }

    #[test]
    fn fringe_alpha_grows_with_distance() {
        let background = Lab::from_rgb(&[255, 255, 255]);
        let near = Lab {
            l: background.l - 12.0,
            ..background
        };
        let far = Lab {
            l: background.l - 23.0,
            ..background
        };

        let PixelClass::Fringe(near_alpha) = THRESHOLDS.classify(&background, &near, 255) else {
            panic!("near pixel should be fringe");
        };
        let PixelClass::Fringe(far_alpha) = THRESHOLDS.classify(&background, &far, 255) else {
            panic!("far pixel should be fringe");
        };
        assert!(near_alpha < far_alpha);
    }

    #[test]
    fn large_images_take_parallel_path() {
        let img = RgbaImage::from_pixel(256, 160, Rgba([255, 255, 255, 255]));
        let labs = vec![Lab::from_rgb(&[255, 255, 255]); 256 * 160];
        let classes = classify_pixels(&img, &labs, &labs[0], THRESHOLDS);
        assert_eq!(classes.len(), 256 * 160);
        assert!(classes.iter().all(|c| *c == PixelClass::Background));
    }
}
