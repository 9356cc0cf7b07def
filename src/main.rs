//! picflip - remove image backgrounds and convert between image formats.

mod cli;
mod error;
mod image;
mod logger;

use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help/version and usage errors still get the banner first
            cli::banner::print_banner();
            e.exit()
        }
    };

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    cli::banner::print_banner();

    match &cli.command {
        Commands::Remove {
            input,
            output,
            model,
        } => cli::remove::remove_background(input, output, model.as_deref()),
        Commands::Convert {
            input,
            output,
            format,
        } => cli::convert::convert_image(input, output, format),
    }
}
