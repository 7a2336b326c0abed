//! Visualizer registry and the shared rendering context.
//!
//! A visualizer is thin glue: it decides which attributes of the
//! [`AttributeMap`] to show and in which order, and draws them with the
//! primitives from [`dmviz_core::draw`]. Visualizers are looked up by name
//! with [`find_visualizer`].

mod firewall_policies;
mod firewall_rules;
mod logical_stack;
mod wan_manager;

pub use firewall_policies::FirewallPolicies;
pub use firewall_rules::FirewallRules;
pub use logical_stack::LogicalStack;
pub use wan_manager::WanManager;

use log::debug;

use dmviz_core::{
    attributes::{ALIAS, AttributeMap},
    draw::{BorderPosition, BorderStyle, Layout, PLACEHOLDER, Status, Theme, draw_border},
    path::InstancePath,
};
use dmviz_parser::{
    TreeEntry, TreeNode,
    resolve::{Resolution, resolve_all},
};

use crate::{error::DmvizError, report::Report};

const FIREWALL: &str = "Device.Firewall";
const FIREWALL_CHAIN: &str = "Device.Firewall.Chain";
const FIREWALL_LEVEL: &str = "Device.Firewall.Level";
const RULE: &str = "Rule";
const NAME: &str = "Name";

/// Prefix shared by the built-in visualizer names.
const NAME_PREFIX: &str = "show_";

/// A named diagram over a parsed dump.
pub trait Visualizer: Sync {
    /// The name used to select this visualizer, e.g. `show_firewall_rules`.
    fn name(&self) -> &'static str;

    /// A one-line description for listings.
    fn description(&self) -> &'static str;

    /// Appends the diagram to `report`.
    fn render(&self, ctx: &RenderContext<'_>, report: &mut Report);
}

static VISUALIZERS: [&dyn Visualizer; 4] = [&FirewallPolicies, &FirewallRules, &LogicalStack, &WanManager];

/// Returns every built-in visualizer, sorted by name.
pub fn visualizers() -> &'static [&'static dyn Visualizer] {
    &VISUALIZERS
}

/// Returns the names of every built-in visualizer.
pub fn visualizer_names() -> Vec<&'static str> {
    VISUALIZERS.iter().map(|visualizer| visualizer.name()).collect()
}

/// Selects a visualizer by exact name or by a unique case-insensitive prefix.
///
/// The prefix may omit the leading `show_`.
///
/// # Errors
///
/// Returns [`DmvizError::UnknownVisualizer`] if nothing matches and
/// [`DmvizError::AmbiguousVisualizer`] if more than one visualizer matches.
///
/// # Examples
///
/// ```
/// # use dmviz::visualize::find_visualizer;
/// assert_eq!(find_visualizer("show_wan_manager").unwrap().name(), "show_wan_manager");
/// assert_eq!(find_visualizer("logical").unwrap().name(), "show_logical_stack");
/// assert!(find_visualizer("show_firewall").is_err());
/// ```
pub fn find_visualizer(name: &str) -> Result<&'static dyn Visualizer, DmvizError> {
    let query = name.trim();
    if let Some(visualizer) = VISUALIZERS.iter().find(|visualizer| visualizer.name() == query) {
        return Ok(*visualizer);
    }

    let needle = query.to_ascii_lowercase();
    let matches: Vec<&'static dyn Visualizer> = if needle.is_empty() {
        Vec::new()
    } else {
        VISUALIZERS
            .iter()
            .copied()
            .filter(|visualizer| matches_prefix(visualizer.name(), &needle))
            .collect()
    };
    debug!(query, matches = matches.len(); "Visualizer lookup");

    match matches.as_slice() {
        [visualizer] => Ok(*visualizer),
        [] => Err(DmvizError::UnknownVisualizer {
            name: query.to_string(),
            available: visualizer_names(),
        }),
        candidates => Err(DmvizError::AmbiguousVisualizer {
            name: query.to_string(),
            candidates: candidates.iter().map(|visualizer| visualizer.name()).collect(),
        }),
    }
}

fn matches_prefix(name: &str, needle: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.starts_with(needle)
        || name
            .strip_prefix(NAME_PREFIX)
            .is_some_and(|rest| rest.starts_with(needle))
}

/// Everything a visualizer needs to draw: the parsed dump, the theme and the target width.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    map: &'a AttributeMap,
    theme: &'a Theme,
    width: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(map: &'a AttributeMap, theme: &'a Theme, width: usize) -> Self {
        Self { map, theme, width }
    }

    pub fn map(&self) -> &'a AttributeMap {
        self.map
    }

    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The layout selected for the current width.
    pub fn layout(&self) -> Layout {
        self.theme.layout(self.width)
    }

    pub fn glyph(&self, status: Status) -> &'static str {
        self.theme.glyph(status)
    }

    /// Returns a non-empty attribute value.
    pub fn value(&self, instance: impl AsRef<str>, attr: &str) -> Option<&'a str> {
        self.map.get_non_empty(instance, attr)
    }

    /// Returns an attribute value, or the placeholder when it is absent or empty.
    pub fn text(&self, instance: impl AsRef<str>, attr: &str) -> &'a str {
        self.value(instance, attr).unwrap_or(PLACEHOLDER)
    }

    /// The human-facing name of an instance: its `Name`, else its `Alias`.
    pub fn display_name(&self, path: &InstancePath) -> Option<&'a str> {
        self.value(path, NAME).or_else(|| self.value(path, ALIAS))
    }

    /// `Short.Path (alias)`, using the `Alias`, else the `Name`, of the instance.
    pub fn path_label(&self, path: &InstancePath) -> String {
        match self.value(path, ALIAS).or_else(|| self.value(path, NAME)) {
            Some(alias) => format!("{} ({alias})", path.short()),
            None => path.short().to_string(),
        }
    }

    /// Labels every token of a reference list, comma separated.
    ///
    /// Resolved tokens use [`path_label`](Self::path_label); tokens that name
    /// no instance are shown verbatim behind the unresolved glyph. An absent
    /// or empty list renders as the placeholder.
    pub fn reference_label(&self, raw: Option<&str>, type_prefix: &str) -> String {
        let labels: Vec<String> = raw
            .map(|raw| resolve_all(self.map, raw, type_prefix))
            .unwrap_or_default()
            .into_iter()
            .map(|resolution| match resolution {
                Resolution::Resolved(path) => self.path_label(&path),
                Resolution::Unresolved(token) => self.unresolved_label(token),
            })
            .collect();

        if labels.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            labels.join(", ")
        }
    }

    fn unresolved_label(&self, token: &str) -> String {
        format!("{} {token} (unresolved)", self.glyph(Status::Unresolved))
    }

    /// Renders one node of a reference tree as an indented `└── ` line.
    ///
    /// `label` formats resolved instances; cycle, shared and unresolved
    /// leaves get their markers here.
    fn tree_line(&self, node: &TreeNode, label: impl Fn(&InstancePath) -> String) -> String {
        let indent = "    ".repeat(node.depth);
        let connector = if node.depth > 0 { "└── " } else { "" };
        let text = match &node.entry {
            TreeEntry::Instance(path) => label(path),
            TreeEntry::Cycle(path) => format!("{} {} (cycle)", self.glyph(Status::Cycle), path.short()),
            TreeEntry::Shared(path) => format!("{} (see above)", path.short()),
            TreeEntry::Unresolved(token) => self.unresolved_label(token),
        };
        format!("{indent}{connector}{text}")
    }

    /// Appends a full-width section heading framed by rules.
    fn section_heading(&self, report: &mut Report, title: &str) {
        report.push(draw_border(BorderStyle::Rule, BorderPosition::Top, self.width));
        report.push(format!("  {title}"));
        report.push(draw_border(BorderStyle::Rule, BorderPosition::Bottom, self.width));
    }
}
