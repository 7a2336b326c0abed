//! Error adapter for converting DmvizError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan};

use dmviz::DmvizError;

/// Adapter exposing a [`DmvizError`] as a miette diagnostic with a stable code and help text.
pub struct ErrorAdapter<'a>(pub &'a DmvizError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DmvizError::InputNotFound { .. } => "dmviz::input",
            DmvizError::Io(_) => "dmviz::io",
            DmvizError::Config(_) => "dmviz::config",
            DmvizError::UnknownVisualizer { .. } => "dmviz::unknown_visualizer",
            DmvizError::AmbiguousVisualizer { .. } => "dmviz::ambiguous_visualizer",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            DmvizError::InputNotFound { .. } => {
                "pass the dump path as the second argument; the default is DM.txt in the working directory"
                    .to_string()
            }
            DmvizError::UnknownVisualizer { available, .. } => {
                format!("available visualizers: {}", available.join(", "))
            }
            DmvizError::AmbiguousVisualizer { .. } => "type more of the name to select one visualizer".to_string(),
            DmvizError::Config(_) => "check the [render] section of the configuration file".to_string(),
            DmvizError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Renders `err` with miette's graphical handler.
pub fn render(err: &DmvizError) -> String {
    let mut writer = String::new();
    if GraphicalReportHandler::new()
        .render_report(&mut writer, &ErrorAdapter(err))
        .is_err()
    {
        return err.to_string();
    }
    writer
}
