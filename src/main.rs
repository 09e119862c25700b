//! Fontface - Generate web fonts and an @font-face stylesheet from TrueType fonts.

mod cli;
mod config;
mod core;
mod embed;
mod error;
mod font;
mod generator;
mod logger;
mod pipeline;
mod plan;
mod stylesheet;
mod tools;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, build::build_fonts};
use config::ProjectConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ProjectConfig::load(&cli.config)?;
    build_fonts(&cli, &config)
}
