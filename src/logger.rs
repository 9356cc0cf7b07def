//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//! - `status_success` / `status_error` for the final `✓` / `✘` result line
//! - `PendingLine` for a transient "working..." line during slow steps
//!
//! # Example
//!
//! ```ignore
//! log!("svg"; "rendering {}x{}", width, height);
//!
//! let pending = PendingLine::new("remove", "running segmentation model");
//! let result = model.run();
//! pending.clear();
//! status_success("Background removed!");
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream};
use std::{
    io::{IsTerminal, Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Whether a pending line is currently on screen (for log coordination)
static PENDING: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    clear_pending(&mut stdout);
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "remove" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_blue().bold().to_string())
            .to_string(),
        "convert" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_green().bold().to_string())
            .to_string(),
        _ => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_yellow().bold().to_string())
            .to_string(),
    }
}

/// Clear a pending line left on the current row, if any.
fn clear_pending(stdout: &mut impl Write) {
    if PENDING.swap(false, Ordering::SeqCst) {
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
    }
}

// ============================================================================
// Status Lines
// ============================================================================

/// Print a success line (`✓` prefix, whole line green).
pub fn status_success(message: &str) {
    let line = format!("✓ {message}");
    print_status(
        &line
            .if_supports_color(Stream::Stdout, |l| l.green().to_string())
            .to_string(),
    );
}

/// Print a failure line (`✘` prefix, whole line red).
pub fn status_error(message: &str) {
    let line = format!("✘ {message}");
    print_status(
        &line
            .if_supports_color(Stream::Stdout, |l| l.red().to_string())
            .to_string(),
    );
}

/// Print a hint line (red, no symbol), used for missing optional features.
pub fn status_hint(message: &str) {
    print_status(
        &message
            .if_supports_color(Stream::Stdout, |m| m.red().to_string())
            .to_string(),
    );
}

fn print_status(line: &str) {
    let mut stdout = stdout().lock();
    clear_pending(&mut stdout);
    writeln!(stdout, "{line}").ok();
    stdout.flush().ok();
}

// ============================================================================
// Pending Line (transient single-line status)
// ============================================================================

/// Transient status line shown while a slow step runs.
///
/// Displays: `[remove] running segmentation model...` without a trailing
/// newline. The next `log`/status call (or `clear`/drop) wipes it, so the
/// final output only keeps the result line. Nothing is printed when stdout
/// is not a terminal.
pub struct PendingLine {
    _private: (),
}

impl PendingLine {
    /// Show a pending message under the given module prefix.
    pub fn new(module: &str, message: &str) -> Self {
        if !stdout().is_terminal() {
            return Self { _private: () };
        }

        let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
        let dots = "...".if_supports_color(Stream::Stdout, |d| d.dimmed().to_string());

        let mut stdout = stdout().lock();
        clear_pending(&mut stdout);
        write!(stdout, "{prefix} {message}{dots}").ok();
        stdout.flush().ok();
        PENDING.store(true, Ordering::SeqCst);

        Self { _private: () }
    }

    /// Remove the pending line from the terminal.
    pub fn clear(self) {
        // Drop does the work.
    }
}

impl Drop for PendingLine {
    fn drop(&mut self) {
        let mut stdout = stdout().lock();
        clear_pending(&mut stdout);
        stdout.flush().ok();
    }
}

// ============================================================================
// Tests
// ============================================================================
