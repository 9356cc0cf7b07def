//! Background removal backends.
//!
//! Every backend takes encoded image bytes and returns PNG bytes with the
//! background made transparent.
//!
//! - [`EdgeFloodRemover`]: built-in, no model needed. Detects the background
//!   color in LAB space and clears the region connected to the image border.
//! - `U2NetRemover` (feature `onnx`): pretrained U²-Net segmentation model
//!   run through ONNX Runtime.

mod classify;
mod edge;
mod fill;
mod palette;
#[cfg(feature = "onnx")]
mod u2net;

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::{DynamicImage, ImageFormat};

pub use edge::EdgeFloodRemover;
#[cfg(feature = "onnx")]
pub use u2net::U2NetRemover;

/// Turns an encoded image into an encoded image with a transparent background.
pub trait BackgroundRemover {
    /// Short backend name for log output.
    fn name(&self) -> &'static str;

    /// Remove the background from `input` (any supported encoding) and
    /// return PNG-encoded RGBA bytes.
    fn remove(&mut self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Pick a backend: the segmentation model when `model` is given, otherwise
/// the built-in edge flood fill.
pub fn select_remover(model: Option<&Path>) -> Result<Box<dyn BackgroundRemover>> {
    match model {
        None => Ok(Box::new(EdgeFloodRemover::default())),
        #[cfg(feature = "onnx")]
        Some(path) => Ok(Box::new(U2NetRemover::from_file(path)?)),
        #[cfg(not(feature = "onnx"))]
        Some(path) => anyhow::bail!(
            "cannot load model `{}`: picflip was built without ONNX support! \
             Reinstall it with: cargo install picflip --features onnx",
            path.display()
        ),
    }
}

/// Encode an image as PNG in memory.
pub(crate) fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_edge_flood() {
        let remover = select_remover(None).unwrap();
        assert_eq!(remover.name(), "edge-flood");
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn model_without_onnx_feature_is_an_error() {
        let err = select_remover(Some(Path::new("u2net.onnx")))
            .err()
            .expect("model should be rejected");
        let msg = err.to_string();
        assert!(msg.contains("u2net.onnx"));
        assert!(msg.contains("--features onnx"));
    }

    #[test]
    fn encode_png_produces_png_signature() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::new(2, 2));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }
}
