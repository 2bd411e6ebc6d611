//! Command-line argument definitions for the Stageflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, configuration file
//! selection, container size and variant overrides, and logging verbosity.

use clap::Parser;

use stageflow::topology::DiagramVariant;

/// Command-line arguments for the Stageflow diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Container width in pixels, overriding the configuration
    #[arg(long)]
    pub width: Option<f32>,

    /// Container height in pixels, overriding the configuration
    #[arg(long)]
    pub height: Option<f32>,

    /// Diagram variant (standard, wide), overriding the configuration
    #[arg(long)]
    pub variant: Option<DiagramVariant>,

    /// Directory icon references are resolved against; icons are linked
    /// as-is when omitted
    #[arg(long)]
    pub icons_dir: Option<String>,

    /// Print the animation schedule to stdout
    #[arg(long)]
    pub timeline: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
