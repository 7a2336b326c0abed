//! CLI logic for the dmviz tool.
//!
//! Loads configuration, resolves the visualizer, parses the dump and writes
//! the rendered report. Diagram output goes to stdout; the narrow-width
//! advisory goes to stderr.

pub mod error_adapter;

mod args;
mod config;
mod terminal;

pub use args::{Args, DEFAULT_DUMP};

use std::io::{self, Write};

use log::info;

use dmviz::{
    DmvizError, ReportBuilder,
    visualize::{find_visualizer, visualizers},
};

/// Run the dmviz CLI application, writing to the process's stdout and stderr.
///
/// # Errors
///
/// Returns `DmvizError` for:
/// - Unknown or ambiguous visualizer names
/// - Configuration loading errors
/// - A missing or unreadable dump file
pub fn run(args: &Args) -> Result<(), DmvizError> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_with_output(args, &mut stdout.lock(), &mut stderr.lock())
}

/// Run the dmviz CLI application against explicit output streams.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write, err: &mut impl Write) -> Result<(), DmvizError> {
    if args.list {
        write_visualizer_list(out)?;
        return Ok(());
    }

    let visualizer = find_visualizer(args.visualizer.as_deref().unwrap_or_default())?;
    let app_config = config::load_config(args.config.as_ref())?;
    let width = args
        .width
        .unwrap_or_else(|| terminal::detect_width(app_config.render().fallback_width()));

    info!(
        visualizer = visualizer.name(),
        dump = args.dump,
        width;
        "Processing dump"
    );

    let builder = ReportBuilder::new(app_config);
    if let Some(warning) = builder.config().render().theme().narrow_width_warning(width) {
        writeln!(err, "{warning}")?;
    }

    writeln!(out, "Parsing: {}", args.dump)?;
    writeln!(out)?;
    let map = builder.load(&args.dump)?;

    let report = builder.render(visualizer, &map, width);
    write!(out, "{report}")?;
    out.flush()?;

    info!(lines = report.len(); "Report written");
    Ok(())
}

fn write_visualizer_list(out: &mut impl Write) -> io::Result<()> {
    let visualizers = visualizers();
    let name_width = visualizers
        .iter()
        .map(|visualizer| visualizer.name().len())
        .max()
        .unwrap_or_default();
    for visualizer in visualizers {
        writeln!(
            out,
            "{:<name_width$}  {}",
            visualizer.name(),
            visualizer.description()
        )?;
    }
    Ok(())
}
