//! `show_logical_stack`: the interface stack below each `Device.Logical.Interface`.

use dmviz_core::{
    attributes::ALIAS,
    draw::{BorderPosition, BorderStyle, Card, PLACEHOLDER, Status, Table, draw_border, truncate},
    path::InstancePath,
};
use dmviz_parser::{
    WalkOutcome,
    resolve::{walk, walk_tree},
};

use super::{RenderContext, Visualizer};
use crate::report::Report;

const LOGICAL: &str = "Device.Logical";
const LOGICAL_INTERFACE: &str = "Device.Logical.Interface";
const LOWER_LAYERS: &str = "LowerLayers";

/// `WAN` or `LAN` from the vendor role flags of a logical interface.
fn role(ctx: &RenderContext<'_>, interface: &InstancePath) -> &'static str {
    let enabled = |attr| ctx.value(interface, attr) == Some("Enabled");
    if enabled("X_PRPLWARE-COM_WAN.Status") {
        "WAN"
    } else if enabled("X_PRPLWARE-COM_LAN.Status") {
        "LAN"
    } else {
        PLACEHOLDER
    }
}

/// `Short.Path  (name)  [status]`
fn layer_label(ctx: &RenderContext<'_>, path: &InstancePath) -> String {
    let mut label = path.short().to_string();
    if let Some(name) = ctx.display_name(path) {
        label.push_str(&format!("  ({name})"));
    }
    if let Some(status) = ctx.value(path, "Status") {
        label.push_str(&format!("  [{status}]"));
    }
    label
}

/// Interface stacks as trees plus a one-row-per-interface summary.
#[derive(Debug, Clone, Copy)]
pub struct LogicalStack;

impl LogicalStack {
    fn render_interface(ctx: &RenderContext<'_>, interface: &InstancePath, report: &mut Report) {
        let id = interface.split_instance().map_or(0, |(_, id)| id);
        let card = Card::new(BorderStyle::Double).with_header_line(format!(
            "Logical.Interface.{id} \"{}\"  (Role: {})",
            ctx.display_name(interface).unwrap_or_default(),
            role(ctx, interface)
        ));

        report.blank();
        report.extend(card.render(ctx.width()));
        report.blank();
        for node in walk_tree(ctx.map(), interface.clone(), LOWER_LAYERS, "") {
            let line = ctx.tree_line(&node, |path| layer_label(ctx, path));
            report.push(truncate(&line, ctx.width()));
        }
    }

    /// Summary row: the first three layers below the interface along the first lower layer.
    fn summary_row(ctx: &RenderContext<'_>, interface: &InstancePath) -> [String; 7] {
        let (steps, outcome) = walk(ctx.map(), interface.clone(), LOWER_LAYERS, "").finish();
        let short = |depth: usize| steps.get(depth).map(|path| path.short().to_string());

        let bottom = match (steps.get(3), &outcome) {
            (Some(path), _) => match ctx.display_name(path) {
                Some(name) => format!("{} ({name})", path.short()),
                None => path.short().to_string(),
            },
            (None, WalkOutcome::Cycle(path)) => format!("{} {}", ctx.glyph(Status::Cycle), path.short()),
            (None, WalkOutcome::Unresolved(token)) => format!("{} {token}", ctx.glyph(Status::Unresolved)),
            (None, WalkOutcome::Terminal) => PLACEHOLDER.to_string(),
        };

        [
            interface.split_instance().map_or(0, |(_, id)| id).to_string(),
            ctx.text(interface, ALIAS).to_string(),
            role(ctx, interface).to_string(),
            ctx.text(interface, "Status").to_string(),
            short(1).unwrap_or_default(),
            short(2).unwrap_or_default(),
            bottom,
        ]
    }
}

impl Visualizer for LogicalStack {
    fn name(&self) -> &'static str {
        "show_logical_stack"
    }

    fn description(&self) -> &'static str {
        "Logical interfaces and their LowerLayers stacks"
    }

    fn render(&self, ctx: &RenderContext<'_>, report: &mut Report) {
        report.push(format!(
            "Device.Logical.InterfaceNumberOfEntries = {}",
            ctx.text(LOGICAL, "InterfaceNumberOfEntries")
        ));
        report.push(draw_border(BorderStyle::Rule, BorderPosition::Top, ctx.width()));

        let interfaces = ctx.map().instances(LOGICAL_INTERFACE);
        if interfaces.is_empty() {
            report.push("No logical interfaces found.");
            return;
        }

        for interface in &interfaces {
            Self::render_interface(ctx, interface, report);
        }

        report.blank();
        ctx.section_heading(report, "LOGICAL INTERFACE SUMMARY");
        let mut table = Table::new(["#", "Alias", "Role", "Status", "IP Interface", "Eth Link", "Bottom Layer"]);
        for interface in &interfaces {
            table.push_row(Self::summary_row(ctx, interface));
        }
        report.extend(table.render(ctx.layout(), ctx.width()));
        report.blank();
    }
}
