//! LAB color helpers and background color estimation.

use image::RgbaImage;
use lab::{Lab, rgb_bytes_to_labs};

/// Side of the square sampled at each corner.
const CORNER_WINDOW: u32 = 5;
/// Corner pixels more transparent than this are not sampled.
const MIN_SAMPLE_ALPHA: u8 = 8;
/// Samples closer than this ΔE join the same group.
const GROUP_RADIUS: f32 = 8.0;

/// Convert every pixel to LAB, in row-major order (alpha ignored).
pub(super) fn to_lab_pixels(img: &RgbaImage) -> Vec<Lab> {
    let rgb: Vec<u8> = img
        .as_raw()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    rgb_bytes_to_labs(&rgb)
}

/// Squared CIE76 distance (ΔE²).
#[inline]
pub(super) fn delta_e_sq(a: &Lab, b: &Lab) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    dl * dl + da * da + db * db
}

/// Running weighted mean of a group of similar samples.
#[derive(Clone, Copy)]
struct SampleGroup {
    mean: Lab,
    weight: f32,
}

impl SampleGroup {
    fn absorb(&mut self, lab: Lab, weight: f32) {
        let total = self.weight + weight;
        let t = weight / total;
        self.mean = Lab {
            l: self.mean.l + (lab.l - self.mean.l) * t,
            a: self.mean.a + (lab.a - self.mean.a) * t,
            b: self.mean.b + (lab.b - self.mean.b) * t,
        };
        self.weight = total;
    }
}

/// Estimate the background color from the four corners.
///
/// Corner samples are grouped by similarity and the heaviest group wins, so a
/// subject touching one corner does not skew the estimate. Falls back to white
/// when every corner is transparent.
pub(super) fn estimate_background(img: &RgbaImage) -> Lab {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return WHITE;
    }

    let right = width.saturating_sub(CORNER_WINDOW);
    let bottom = height.saturating_sub(CORNER_WINDOW);
    let origins = [(0, 0), (right, 0), (0, bottom), (right, bottom)];

    let mut groups: Vec<SampleGroup> = Vec::new();
    for (ox, oy) in origins {
        for y in oy..(oy + CORNER_WINDOW).min(height) {
            for x in ox..(ox + CORNER_WINDOW).min(width) {
                let px = img.get_pixel(x, y);
                if px[3] < MIN_SAMPLE_ALPHA {
                    continue;
                }
                let lab = Lab::from_rgb(&[px[0], px[1], px[2]]);
                let weight = (f32::from(px[3]) / 255.0).max(0.1);
                add_sample(&mut groups, lab, weight);
            }
        }
    }

    groups
        .iter()
        .max_by(|a, b| a.weight.total_cmp(&b.weight))
        .map_or(WHITE, |g| g.mean)
}

fn add_sample(groups: &mut Vec<SampleGroup>, lab: Lab, weight: f32) {
    let nearest = groups
        .iter_mut()
        .map(|g| (delta_e_sq(&g.mean, &lab), g))
        .min_by(|(a, _), (b, _)| a.total_cmp(b));

    match nearest {
        Some((dist_sq, group)) if dist_sq <= GROUP_RADIUS * GROUP_RADIUS => {
            group.absorb(lab, weight);
        }
        _ => groups.push(SampleGroup { mean: lab, weight }),
    }
}

const WHITE: Lab = Lab {
    l: 100.0,
    a: 0.0,
    b: 0.0,
};

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn close(a: &Lab, b: &Lab) -> bool {
        delta_e_sq(a, b) < 1.0
    }

    #[test]
    fn uniform_image_estimates_its_color() {
        let img = RgbaImage::from_pixel(20, 20, Rgba([0, 128, 0, 255]));
        let expected = Lab::from_rgb(&[0, 128, 0]);
        assert!(close(&estimate_background(&img), &expected));
    }

    #[test]
    fn majority_of_corners_wins() {
        let mut img = RgbaImage::from_pixel(30, 30, Rgba([240, 240, 240, 255]));
        // Subject bleeds into the top-left corner only
        for y in 0..8 {
            for x in 0..8 {
                img.put_pixel(x, y, Rgba([200, 0, 0, 255]));
            }
        }
        let expected = Lab::from_rgb(&[240, 240, 240]);
        assert!(close(&estimate_background(&img), &expected));
    }

    #[test]
    fn transparent_corners_fall_back_to_white() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        assert!(close(&estimate_background(&img), &WHITE));
    }

    #[test]
    fn tiny_image_does_not_overflow_window() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([10, 10, 10, 255]));
        let expected = Lab::from_rgb(&[10, 10, 10]);
        assert!(close(&estimate_background(&img), &expected));
    }

    #[test]
    fn lab_pixels_match_pixel_count() {
        let img = RgbaImage::new(7, 3);
        assert_eq!(to_lab_pixels(&img).len(), 21);
    }
}
