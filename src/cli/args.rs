//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Examples:
  Remove background:    picflip remove input.jpg output.png
  Convert image:        picflip convert input.jpg output.png png
  Convert formats:      picflip convert photo.webp photo.jpg jpg
  Convert SVG:          picflip convert icon.svg icon.png png";

/// picflip - A simple tool to remove backgrounds and convert images!
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Remove the background from an image
    #[command(
        long_about = "Remove the background from any image and save it as PNG (recommended) or other formats"
    )]
    Remove {
        /// Path to the input image (supports jpg, png, webp)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Path for the output image (PNG recommended for transparency)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,

        /// U²-Net ONNX model to segment with (default: built-in edge flood fill)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        model: Option<PathBuf>,
    },

    /// Convert images between formats
    #[command(
        long_about = "Convert images between different formats (PNG, JPG, JPEG, WEBP, SVG)"
    )]
    Convert {
        /// Path to the input image
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Path for the output image
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,

        /// Output format (png, jpg, jpeg, webp)
        format: String,
    },
}
