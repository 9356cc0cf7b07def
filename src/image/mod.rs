//! Image processing.
//!
//! # Modules
//!
//! - [`format`]: output formats accepted by `convert`
//! - [`convert`]: raster decode / re-encode
//! - [`svg`]: SVG to PNG rasterization (feature `svg`)
//! - [`background`]: background removal backends

pub mod background;
pub mod convert;
pub mod format;
pub mod svg;

pub use format::OutputFormat;
