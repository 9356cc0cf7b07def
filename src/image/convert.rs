//! Raster format conversion.
//!
//! Decodes any image the codec library recognizes and re-encodes it as PNG,
//! JPEG or WebP.

use std::path::Path;

use image::{ColorType, DynamicImage, ImageReader};

use crate::error::{PicflipError, Result};
use crate::image::OutputFormat;

/// Convert the raster image at `input` and write it to `output` as `format`.
///
/// The decoded image is owned by this call and dropped when it returns,
/// whether the save succeeds or not.
pub fn convert_raster(input: &Path, output: &Path, format: OutputFormat) -> Result<()> {
    let img = open_image(input)?;
    crate::debug!("convert"; "decoded {} ({}x{}, {:?})",
        input.display(), img.width(), img.height(), img.color());

    let img = prepare_for(img, format);
    img.save_with_format(output, format.image_format())?;
    Ok(())
}

/// Open and decode an image, guessing the format from its content.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)
        .map_err(|e| PicflipError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| PicflipError::io(path, e))?
        .decode()?;
    Ok(img)
}

/// Adapt the pixel layout to what the target encoder accepts.
fn prepare_for(img: DynamicImage, format: OutputFormat) -> DynamicImage {
    if format.supports_alpha() {
        match format {
            OutputFormat::WEBP => to_webp_layout(img),
            _ => img,
        }
    } else {
        flatten_alpha(img)
    }
}

/// Drop the alpha channel (and any >8-bit depth) for JPEG output.
///
/// Alpha is discarded, not composited: transparent pixels keep whatever
/// color they carried underneath.
pub fn flatten_alpha(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img,
        color if !color.has_color() => DynamicImage::ImageLuma8(img.to_luma8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// The WebP encoder only takes 8-bit layouts.
fn to_webp_layout(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => img,
        color if color.has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn rgba_fixture() -> DynamicImage {
        let mut img = RgbaImage::from_pixel(12, 7, Rgba([255, 255, 255, 0]));
        for x in 2..10 {
            for y in 1..6 {
                img.put_pixel(x, y, Rgba([200, 30, 30, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    fn write_fixture(dir: &TempDir, name: &str, format: ImageFormat) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let img = rgba_fixture();
        let img = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };
        img.save_with_format(&path, format).unwrap();
        path
    }

    #[test]
    fn converts_every_supported_pair_keeping_dimensions() {
        let dir = TempDir::new().unwrap();
        let sources = [
            ("src.png", ImageFormat::Png),
            ("src.jpg", ImageFormat::Jpeg),
            ("src.webp", ImageFormat::WebP),
        ];

        for (name, src_format) in sources {
            let input = write_fixture(&dir, name, src_format);
            for format in OutputFormat::ALL {
                let output = dir.path().join(format!("{name}.out.{}", format.name()));
                convert_raster(&input, &output, format)
                    .unwrap_or_else(|e| panic!("{name} -> {format}: {e}"));

                let reopened = image::open(&output).unwrap();
                assert_eq!(reopened.dimensions(), (12, 7), "{name} -> {format}");
                assert_eq!(
                    ImageFormat::from_path(&output).unwrap(),
                    format.image_format()
                );
            }
        }
    }

    #[test]
    fn rgba_png_to_jpeg_flattens_alpha() {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(&dir, "alpha.png", ImageFormat::Png);
        let output = dir.path().join("alpha.jpg");

        convert_raster(&input, &output, OutputFormat::JPG).unwrap();

        let reopened = image::open(&output).unwrap();
        assert!(!reopened.color().has_alpha());
    }

    #[test]
    fn png_to_webp_keeps_alpha() {
        let dir = TempDir::new().unwrap();
        let input = write_fixture(&dir, "alpha.png", ImageFormat::Png);
        let output = dir.path().join("alpha.webp");

        convert_raster(&input, &output, OutputFormat::WEBP).unwrap();

        let reopened = image::open(&output).unwrap().to_rgba8();
        assert_eq!(reopened.get_pixel(0, 0)[3], 0);
        assert_eq!(reopened.get_pixel(5, 3)[3], 255);
    }

    #[test]
    fn missing_input_is_not_found() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.png");

        let err = convert_raster(&dir.path().join("nope.png"), &output, OutputFormat::PNG)
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(!output.exists());
    }

    #[test]
    fn garbage_input_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("fake.png");
        std::fs::write(&input, b"definitely not an image").unwrap();

        let err = convert_raster(&input, &dir.path().join("out.png"), OutputFormat::PNG)
            .unwrap_err();
        assert!(matches!(err, PicflipError::Image(_)));
    }

    #[test]
    fn flatten_keeps_grayscale() {
        let img = DynamicImage::ImageLumaA8(image::GrayAlphaImage::new(3, 3));
        assert_eq!(flatten_alpha(img).color(), ColorType::L8);
    }

    #[test]
    fn flatten_discards_alpha_without_compositing() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 0])));
        let flat = flatten_alpha(img).to_rgb8();
        assert_eq!(flat.get_pixel(0, 0).0, [10, 20, 30]);
    }
}
