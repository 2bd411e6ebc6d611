//! CLI logic for the Stageflow diagram tool.
//!
//! This module contains the core CLI logic for rendering the flow diagram to
//! an SVG file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fmt::Write as _, fs};

use log::info;

use stageflow::{
    FlowDiagram, StageflowError, geometry::ContainerSize, icon::FileIconProvider,
    timeline::Timeline,
};

/// Run the Stageflow CLI application
///
/// Loads the configuration, applies the command-line overrides and writes the
/// rendered SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StageflowError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid node overrides
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), StageflowError> {
    info!(output_path = args.output; "Rendering diagram");

    let mut app_config = config::load_config(args.config.as_ref())?;

    if let Some(variant) = args.variant {
        app_config = app_config.with_variant(variant);
    }

    let container = app_config.container();
    if args.width.is_some() || args.height.is_some() {
        let size = ContainerSize::new(
            args.width.unwrap_or(container.width()),
            args.height.unwrap_or(container.height()),
        );
        app_config = app_config.with_container(size);
    }
    let size = app_config.container();

    let diagram = FlowDiagram::new(app_config)?;

    if args.timeline {
        print!("{}", format_timeline(diagram.timeline()));
    }

    let svg = match &args.icons_dir {
        Some(dir) => diagram.render_svg_with_icons(size, Box::new(FileIconProvider::new(dir)))?,
        None => diagram.render_svg(size)?,
    };

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Format the schedule as one line per target, in schedule order.
///
/// Target names longer than the column are not truncated. With the default
/// timing the output starts:
///
/// ```text
/// node:agent                   0.00s +0.60s
/// segment:agent-processing-vertical 0.75s +1.20s
/// segment:agent-processing-horizontal 1.95s +1.20s
/// node:processing              3.30s +0.60s
/// ```
pub fn format_timeline(timeline: &Timeline) -> String {
    let mut out = String::new();
    for (target, entry) in timeline.iter() {
        let _ = writeln!(
            out,
            "{:<28}{:>5.2}s +{:.2}s",
            target.to_string(),
            entry.delay(),
            entry.duration()
        );
    }
    let _ = writeln!(out, "total {:.2}s", timeline.total_duration());
    out
}
