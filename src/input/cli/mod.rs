//! Headless command-line rendering.

pub mod args;
mod run_cli;

pub use run_cli::run_cli;
