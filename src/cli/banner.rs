//! Startup banner and usage text.

use std::io::{Write, stdout};

use owo_colors::{OwoColorize, Stream};

const ASCII_ART: &str = r"
           /$$            /$$$$$$  /$$ /$$
          |__/           /$$__  $$| $$|__/
  /$$$$$$  /$$  /$$$$$$$| $$  \__/| $$ /$$  /$$$$$$
 /$$__  $$| $$ /$$_____/| $$$$    | $$| $$ /$$__  $$
| $$  \ $$| $$| $$      | $$_/    | $$| $$| $$  \ $$
| $$  | $$| $$| $$      | $$      | $$| $$| $$  | $$
| $$$$$$$/| $$|  $$$$$$$| $$      | $$| $$| $$$$$$$/
| $$____/ |__/ \_______/|__/      |__/|__/| $$____/
| $$                                      | $$
| $$                                      | $$
|__/                                      |__/
";

const TAGLINE: &str = "this is picflip! remove backgrounds and convert images!";

/// Print the banner, tagline and usage summary to stdout.
pub fn print_banner() {
    let mut out = stdout().lock();
    writeln!(out, "{}", render_banner()).ok();
    out.flush().ok();
}

fn render_banner() -> String {
    let art = ASCII_ART.if_supports_color(Stream::Stdout, |a| a.cyan().to_string());
    let tagline = TAGLINE.if_supports_color(Stream::Stdout, |t| t.yellow().to_string());
    format!("{art}\n{tagline}\n{}", render_usage())
}

fn render_usage() -> String {
    let heading = |s: &'static str| {
        s.if_supports_color(Stream::Stdout, |h| h.magenta().to_string())
            .to_string()
    };
    let command = |s: &'static str| {
        s.if_supports_color(Stream::Stdout, |c| c.yellow().to_string())
            .to_string()
    };

    format!(
        "{}\n  picflip {} <input_image> <output_image>\n  picflip {} <input_image> <output_image> <output_format>\n{}\n  picflip convert shrek.webp shrek.jpg jpg\n  picflip remove selfie.png selfie_nobg.png\n",
        heading("Usage:"),
        command("remove"),
        command("convert"),
        heading("Examples:"),
    )
}
