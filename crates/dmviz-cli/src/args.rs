//! Command-line argument definitions for the dmviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the visualizer and dump file, override
//! the render width and control configuration and logging.

use clap::Parser;

/// Dump file read when none is given.
pub const DEFAULT_DUMP: &str = "DM.txt";

/// Command-line arguments for the dmviz tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Visualizer to run: a full name such as `show_firewall_rules` or a unique prefix
    #[arg(required_unless_present = "list")]
    pub visualizer: Option<String>,

    /// Path to the TR-181 dump
    #[arg(default_value = DEFAULT_DUMP)]
    pub dump: String,

    /// List available visualizers and exit
    #[arg(short, long)]
    pub list: bool,

    /// Render width in columns; detected from the terminal when omitted
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["dmviz", "show_logical_stack"]).expect("valid arguments");
        assert_eq!(args.visualizer.as_deref(), Some("show_logical_stack"));
        assert_eq!(args.dump, DEFAULT_DUMP);
        assert_eq!(args.width, None);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_list_needs_no_visualizer() {
        let args = Args::try_parse_from(["dmviz", "--list"]).expect("valid arguments");
        assert!(args.list);
        assert!(args.visualizer.is_none());
    }

    #[test]
    fn test_visualizer_required() {
        assert!(Args::try_parse_from(["dmviz"]).is_err());
        assert!(Args::try_parse_from(["dmviz", "show_wan", "dump.txt", "--width", "wide"]).is_err());
    }
}
