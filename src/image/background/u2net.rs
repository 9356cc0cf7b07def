//! U²-Net segmentation through ONNX Runtime.
//!
//! Same pre/post-processing as rembg's `u2net` session, so the public
//! `u2net.onnx` / `u2netp.onnx` / `u2net_human_seg.onnx` weights work as-is.

use std::path::Path;
use std::thread;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbImage, RgbaImage};
use ndarray::Array4;
use ort::session::{Session, builder::GraphOptimizationLevel};

use crate::image::background::{BackgroundRemover, encode_png};

/// Model input side length.
const INPUT_SIZE: u32 = 320;
/// ImageNet normalization.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

pub struct U2NetRemover {
    session: Session,
    input_name: String,
    output_name: String,
}

impl U2NetRemover {
    /// Load the model at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(thread::available_parallelism()?.get())?
            .commit_from_file(path)
            .with_context(|| format!("failed to load model `{}`", path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .context("model has no inputs")?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .context("model has no outputs")?;

        crate::log!("model"; "loaded {}", path.display());
        crate::debug!("model"; "input `{}`, output `{}`", input_name, output_name);

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    /// Predict the foreground mask at model resolution.
    fn predict(&self, img: &DynamicImage) -> Result<GrayImage> {
        let resized = img
            .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Lanczos3)
            .into_rgb8();
        let tensor = input_tensor(&resized);

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor.view()]?)?;
        let prediction = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;

        // First output is (1, 1, H, W) in row-major order
        let side = INPUT_SIZE as usize;
        let values: Vec<f32> = prediction.iter().take(side * side).copied().collect();
        anyhow::ensure!(
            values.len() == side * side,
            "unexpected model output shape {:?}",
            prediction.shape()
        );

        Ok(normalize_mask(&values, INPUT_SIZE, INPUT_SIZE))
    }
}

/// NCHW tensor: each channel scaled by the brightest channel value in the
/// image, then ImageNet mean/std normalized.
fn input_tensor(img: &RgbImage) -> Array4<f32> {
    let (width, height) = img.dimensions();
    let peak = f32::from(img.as_raw().iter().copied().max().unwrap_or(0)).max(1e-6);

    let mut tensor = Array4::<f32>::zeros((1, 3, height as usize, width as usize));
    for (x, y, px) in img.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = (f32::from(px[c]) / peak - MEAN[c]) / STD[c];
        }
    }
    tensor
}

/// Min-max stretch raw predictions to 0..=255. A flat prediction maps to 0.
fn normalize_mask(values: &[f32], width: u32, height: u32) -> GrayImage {
    let (lo, hi) = values
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let range = (hi - lo).max(f32::EPSILON);

    GrayImage::from_fn(width, height, |x, y| {
        let v = values[y as usize * width as usize + x as usize];
        Luma([(((v - lo) / range) * 255.0).round() as u8])
    })
}

/// Resize `mask` to the image size and use it as the alpha channel.
fn apply_mask(img: DynamicImage, mask: &GrayImage) -> RgbaImage {
    let (width, height) = (img.width(), img.height());
    let mask = imageops::resize(mask, width, height, FilterType::Lanczos3);

    let mut rgba = img.into_rgba8();
    for (px, m) in rgba.pixels_mut().zip(mask.pixels()) {
        px[3] = m[0];
    }
    rgba
}

impl BackgroundRemover for U2NetRemover {
    fn name(&self) -> &'static str {
        "u2net"
    }

    fn remove(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(input).context("failed to decode input image")?;
        let mask = self.predict(&img)?;
        encode_png(&DynamicImage::ImageRgba8(apply_mask(img, &mask)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    #[test]
    fn tensor_is_nchw_and_normalized() {
        let mut img = RgbImage::from_pixel(4, 2, Rgb([0, 0, 0]));
        img.put_pixel(3, 1, Rgb([200, 100, 50]));

        let tensor = input_tensor(&img);

        assert_eq!(tensor.shape(), &[1, 3, 2, 4]);
        // Brightest channel (200) scales to 1.0
        let expect_r = (1.0 - MEAN[0]) / STD[0];
        let expect_g = (0.5 - MEAN[1]) / STD[1];
        let expect_b = (0.25 - MEAN[2]) / STD[2];
        assert!((tensor[[0, 0, 1, 3]] - expect_r).abs() < 1e-5);
        assert!((tensor[[0, 1, 1, 3]] - expect_g).abs() < 1e-5);
        assert!((tensor[[0, 2, 1, 3]] - expect_b).abs() < 1e-5);
        // Black pixels only carry the mean shift
        assert!((tensor[[0, 1, 0, 0]] - (-MEAN[1] / STD[1])).abs() < 1e-5);
    }

    #[test]
    fn black_image_does_not_divide_by_zero() {
        let tensor = input_tensor(&RgbImage::new(3, 3));
        assert!(tensor.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn mask_is_stretched_to_full_range() {
        let values = [0.2, 0.4, 0.6, 0.8, 0.65, 0.2];

        let mask = normalize_mask(&values, 3, 2);

        assert_eq!(mask.dimensions(), (3, 2));
        assert_eq!(mask.get_pixel(0, 0)[0], 0);
        assert_eq!(mask.get_pixel(0, 1)[0], 255);
        assert_eq!(mask.get_pixel(1, 1)[0], 191);
        assert_eq!(mask.get_pixel(2, 1)[0], 0);
    }

    #[test]
    fn flat_prediction_maps_to_zero() {
        let mask = normalize_mask(&[0.7; 4], 2, 2);
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn mask_becomes_alpha_at_image_size() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([10, 20, 30, 255])));
        let mask = GrayImage::from_pixel(4, 4, Luma([0]));

        let out = apply_mask(img, &mask);

        assert_eq!(out.dimensions(), (8, 6));
        assert!(out.pixels().all(|p| p[3] == 0 && p[0] == 10 && p[2] == 30));
    }
}
