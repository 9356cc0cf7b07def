//! Command-line interface module.

mod args;
pub mod banner;
pub mod convert;
pub mod remove;

pub use args::{Cli, Commands};
