//! dmviz - Text diagrams from flat TR-181 device configuration dumps.
//!
//! Loading, reference resolution and width-adaptive rendering of
//! `Device.Path.Attr=value` dumps. Each diagram is produced by a named
//! [`Visualizer`](visualize::Visualizer) from the built-in registry.

pub mod config;
pub mod visualize;

mod error;
mod report;

pub use dmviz_core::{attributes, draw, path};
pub use dmviz_parser::resolve;

pub use error::DmvizError;
pub use report::Report;

use std::{fs::File, io::BufReader, path::Path};

use log::{debug, info};

use dmviz_core::attributes::AttributeMap;

use config::AppConfig;
use visualize::{RenderContext, Visualizer};

/// Builder for loading dumps and rendering reports.
///
/// # Examples
///
/// ```rust
/// use dmviz::{ReportBuilder, config::AppConfig, visualize::find_visualizer};
///
/// let builder = ReportBuilder::new(AppConfig::default());
/// let map = builder.parse(r#"
/// Device.Firewall.Enable=1
/// Device.Firewall.Chain.1.Name="Forward_L_Medium"
/// Device.Firewall.Chain.1.Alias="WAN2LAN_medium"
/// "#);
///
/// let visualizer = find_visualizer("show_firewall_rules").expect("built-in visualizer");
/// let report = builder.render(visualizer, &map, 100);
/// assert!(report.to_string().contains("Forward_L_Medium"));
/// ```
#[derive(Debug, Default)]
pub struct ReportBuilder {
    config: AppConfig,
}

impl ReportBuilder {
    /// Create a new report builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used for rendering.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load and parse a dump file.
    ///
    /// Lines that are not assignments are skipped; the only failures are
    /// about the file itself.
    ///
    /// # Errors
    ///
    /// Returns [`DmvizError::InputNotFound`] if the file cannot be opened and
    /// [`DmvizError::Io`] if reading it fails.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<AttributeMap, DmvizError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading dump");

        let file = File::open(path).map_err(|source| DmvizError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let map = dmviz_parser::parse_reader(BufReader::new(file))?;

        debug!(keys = map.len(); "Dump loaded");
        Ok(map)
    }

    /// Parse an in-memory dump.
    pub fn parse(&self, source: &str) -> AttributeMap {
        dmviz_parser::parse_str(source)
    }

    /// Render `map` with `visualizer` at a terminal width of `width` columns.
    ///
    /// Rendering never fails: absent attributes, unresolved references and
    /// reference cycles become visible markers in the report.
    pub fn render(&self, visualizer: &dyn Visualizer, map: &AttributeMap, width: usize) -> Report {
        let theme = self.config.render().theme();
        let ctx = RenderContext::new(map, &theme, width);
        info!(visualizer = visualizer.name(), width, layout:? = ctx.layout(); "Rendering report");

        let mut report = Report::new();
        visualizer.render(&ctx, &mut report);

        debug!(lines = report.len(); "Report rendered");
        report
    }

    /// Look up a visualizer by name and render `map` with it.
    ///
    /// # Errors
    ///
    /// Returns [`DmvizError::UnknownVisualizer`] or
    /// [`DmvizError::AmbiguousVisualizer`] if `name` does not select exactly
    /// one visualizer.
    pub fn render_by_name(&self, name: &str, map: &AttributeMap, width: usize) -> Result<Report, DmvizError> {
        let visualizer = visualize::find_visualizer(name)?;
        Ok(self.render(visualizer, map, width))
    }
}
