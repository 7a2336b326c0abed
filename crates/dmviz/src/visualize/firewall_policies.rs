//! `show_firewall_policies`: firewall levels, policies and the chains they reach.
//!
//! Each policy lists its `Chain` references. Every referenced chain is
//! expanded into the tree of chains reachable through its rules'
//! `TargetChain` jumps, with cycle and unresolved markers.

use std::collections::{HashMap, HashSet};

use dmviz_core::{
    attributes::{ALIAS, AttributeMap},
    draw::{BorderStyle, Card, PLACEHOLDER, Status, Table},
    path::InstancePath,
};
use dmviz_parser::{
    Successors, TreeEntry,
    resolve::{Resolution, resolve_all, resolve_reference, walk_tree_with},
};

use super::{FIREWALL, FIREWALL_CHAIN, FIREWALL_LEVEL, NAME, RULE, RenderContext, Visualizer};
use crate::report::Report;

const FIREWALL_POLICY: &str = "Device.Firewall.Policy";
const CHAIN: &str = "Chain";

/// Expands a chain into the chains its jump rules target, in rule id order.
#[derive(Debug, Clone, Copy)]
struct ChainJumps;

impl Successors for ChainJumps {
    fn successors(&self, map: &AttributeMap, chain: &InstancePath) -> Vec<TreeEntry> {
        let mut entries: Vec<TreeEntry> = Vec::new();
        for rule in map.instances(chain.child(RULE).as_str()) {
            let is_jump = map
                .get_non_empty(&rule, "Target")
                .is_some_and(|target| Status::from_target(target) == Status::Jump);
            let Some(raw) = map.get_non_empty(&rule, "TargetChain").filter(|_| is_jump) else {
                continue;
            };
            for resolution in resolve_all(map, raw, FIREWALL_CHAIN) {
                let entry = TreeEntry::from(resolution);
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            }
        }
        entries
    }
}

/// Firewall levels, policies with their chain trees and a chain reference summary.
#[derive(Debug, Clone, Copy)]
pub struct FirewallPolicies;

impl FirewallPolicies {
    fn render_levels(ctx: &RenderContext<'_>, report: &mut Report) {
        let policy_level = ctx.value(FIREWALL, "PolicyLevel");
        let active = policy_level.and_then(|raw| resolve_reference(ctx.map(), raw, FIREWALL_LEVEL));

        let mut card = Card::new(BorderStyle::Double)
            .with_title("FIREWALL POLICY LEVELS")
            .with_header_line(format!(
                "Active level: {}",
                ctx.reference_label(policy_level, FIREWALL_LEVEL)
            ));

        let levels = ctx.map().instances(FIREWALL_LEVEL);
        if levels.is_empty() {
            card.push_body("(no levels)");
        }
        for level in &levels {
            let marker = if active.as_ref() == Some(level) {
                ctx.glyph(Status::Active)
            } else {
                " "
            };
            card.push_body(format!(
                "{marker} {}  Chain: {}  Default: {}",
                ctx.path_label(level),
                ctx.reference_label(ctx.value(level, CHAIN), FIREWALL_CHAIN),
                ctx.text(level, "DefaultPolicy")
            ));
        }

        report.extend(card.render(ctx.width()));
        report.blank();
    }

    /// Renders one policy card and records which chains it references.
    fn render_policy(
        ctx: &RenderContext<'_>,
        policy: &InstancePath,
        references: &mut HashMap<InstancePath, usize>,
        report: &mut Report,
    ) {
        let id = policy.split_instance().map_or(0, |(_, id)| id);
        let raw_chains = ctx.value(policy, CHAIN);

        let mut card = Card::new(BorderStyle::Single)
            .with_header_line(format!(
                "{} Policy.{id}: {}  Status: {}",
                ctx.glyph(Status::from_flag(ctx.value(policy, "Enable"))),
                ctx.text(policy, ALIAS),
                ctx.text(policy, "Status")
            ))
            .with_header_line(format!(
                "{} → {}  IPVersion: {}",
                ctx.reference_label(ctx.value(policy, "SourceInterface"), ""),
                ctx.reference_label(ctx.value(policy, "DestinationInterface"), ""),
                ctx.text(policy, "IPVersion")
            ))
            .with_header_line(format!("Chains: {}", raw_chains.unwrap_or(PLACEHOLDER)));

        let resolutions = raw_chains
            .map(|raw| resolve_all(ctx.map(), raw, FIREWALL_CHAIN))
            .unwrap_or_default();
        if resolutions.is_empty() {
            card.push_body("(no chains)");
        }

        let mut counted = HashSet::new();
        for resolution in resolutions {
            match resolution {
                Resolution::Resolved(chain) => {
                    if counted.insert(chain.clone()) {
                        *references.entry(chain.clone()).or_default() += 1;
                    }
                    for node in walk_tree_with(ctx.map(), chain, ChainJumps) {
                        card.push_body(ctx.tree_line(&node, |path| ctx.path_label(path)));
                    }
                }
                Resolution::Unresolved(token) => card.push_body(ctx.unresolved_label(token)),
            }
        }

        report.extend(card.render(ctx.width()));
        report.blank();
    }

    fn render_summary(ctx: &RenderContext<'_>, references: &HashMap<InstancePath, usize>, report: &mut Report) {
        ctx.section_heading(report, "CHAIN REFERENCES");

        let chains = ctx.map().list_instance_ids(FIREWALL_CHAIN);
        if chains.is_empty() {
            report.push("No firewall chains found.");
            report.blank();
            return;
        }

        let mut table = Table::new(["ID", "Name", "Alias", "En", "Policies"]);
        for id in chains {
            let chain = InstancePath::new(FIREWALL_CHAIN).instance(id);
            table.push_row([
                id.to_string(),
                ctx.text(&chain, NAME).to_string(),
                ctx.text(&chain, ALIAS).to_string(),
                ctx.glyph(Status::from_flag(ctx.value(&chain, "Enable"))).to_string(),
                references.get(&chain).copied().unwrap_or(0).to_string(),
            ]);
        }
        report.extend(table.render(ctx.layout(), ctx.width()));
        report.blank();
    }
}

impl Visualizer for FirewallPolicies {
    fn name(&self) -> &'static str {
        "show_firewall_policies"
    }

    fn description(&self) -> &'static str {
        "Firewall levels and policies with the chains they reference"
    }

    fn render(&self, ctx: &RenderContext<'_>, report: &mut Report) {
        Self::render_levels(ctx, report);

        let policies = ctx.map().instances(FIREWALL_POLICY);
        if policies.is_empty() {
            report.push("No firewall policies found.");
            report.blank();
        }

        let mut references = HashMap::new();
        for policy in &policies {
            Self::render_policy(ctx, policy, &mut references, report);
        }
        Self::render_summary(ctx, &references, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmviz_core::draw::{Theme, display_width};

    const DUMP: &str = r#"
Device.Firewall.PolicyLevel="Device.Firewall.Level.[Alias=='Medium']."
Device.Firewall.Level.1.Alias="High"
Device.Firewall.Level.1.Chain="High"
Device.Firewall.Level.1.DefaultPolicy="Drop"
Device.Firewall.Level.2.Alias="Medium"
Device.Firewall.Level.2.Chain="3"
Device.Firewall.Level.2.DefaultPolicy="Accept"
Device.Firewall.Policy.1.Alias="wan2lan"
Device.Firewall.Policy.1.Enable=1
Device.Firewall.Policy.1.Status="Enabled"
Device.Firewall.Policy.1.SourceInterface="Device.IP.Interface.2."
Device.Firewall.Policy.1.DestinationInterface="Device.IP.Interface.3."
Device.Firewall.Policy.1.Chain="WAN2LAN_medium, IPV6_WAN2LAN_medium, ghost,"
Device.Firewall.Policy.2.Alias="lan2wan"
Device.Firewall.Policy.2.Chain="1"
Device.IP.Interface.2.Alias="wan"
Device.IP.Interface.3.Alias="lan"
Device.Firewall.Chain.1.Name="Forward_Medium"
Device.Firewall.Chain.1.Alias="WAN2LAN_medium"
Device.Firewall.Chain.1.Enable=1
Device.Firewall.Chain.1.Rule.1.Target="TargetChain"
Device.Firewall.Chain.1.Rule.1.TargetChain="Device.Firewall.Chain.[Alias=='Sub']."
Device.Firewall.Chain.1.Rule.2.Target="Accept"
Device.Firewall.Chain.1.Rule.2.TargetChain="Device.Firewall.Chain.3."
Device.Firewall.Chain.2.Name="Forward6_Medium"
Device.Firewall.Chain.2.Alias="IPV6_WAN2LAN_medium"
Device.Firewall.Chain.3.Name="Unreferenced"
Device.Firewall.Chain.3.Alias="Sub"
Device.Firewall.Chain.3.Rule.1.Target="TargetChain"
Device.Firewall.Chain.3.Rule.1.TargetChain="WAN2LAN_medium"
"#;

    fn render(width: usize) -> Report {
        let map = dmviz_parser::parse_str(DUMP);
        let theme = Theme::default();
        let ctx = RenderContext::new(&map, &theme, width);
        let mut report = Report::new();
        FirewallPolicies.render(&ctx, &mut report);
        report
    }

    #[test]
    fn test_chain_jumps_skip_terminal_targets() {
        let map = dmviz_parser::parse_str(DUMP);
        let jumps = ChainJumps.successors(&map, &InstancePath::new("Device.Firewall.Chain.1"));
        assert_eq!(
            jumps,
            vec![TreeEntry::Instance(InstancePath::new("Device.Firewall.Chain.3"))]
        );
    }

    #[test]
    fn test_active_level_is_marked() {
        let report = render(100);
        assert!(report.contains("Active level: Firewall.Level.2 (Medium)"));
        assert!(report.contains("★ Firewall.Level.2 (Medium)  Chain: Firewall.Chain.3 (Sub)  Default: Accept"));
        assert!(report.contains("  Firewall.Level.1 (High)  Chain: ❓ High (unresolved)  Default: Drop"));
    }

    #[test]
    fn test_policy_chain_tree_with_cycle_and_unresolved() {
        let report = render(100);
        let lines = report.lines();
        let start = lines
            .iter()
            .position(|l| l.contains("Policy.1: wan2lan"))
            .expect("policy card");

        let body: Vec<&str> = lines[start..]
            .iter()
            .take_while(|l| !l.starts_with('└'))
            .map(|l| l.trim_start_matches('│').trim_end_matches('│').trim_end())
            .collect();
        assert!(body.contains(&"  IP.Interface.2 (wan) → IP.Interface.3 (lan)  IPVersion: -"));
        assert!(body.contains(&"  Firewall.Chain.1 (WAN2LAN_medium)"));
        assert!(body.contains(&"      └── Firewall.Chain.3 (Sub)"));
        assert!(body.contains(&"          └── 🔁 Firewall.Chain.1 (cycle)"));
        assert!(body.contains(&"  Firewall.Chain.2 (IPV6_WAN2LAN_medium)"));
        assert!(body.contains(&"  ❓ ghost (unresolved)"));
    }

    #[test]
    fn test_summary_lists_unreferenced_chains() {
        let report = render(120);
        let lines = report.lines();
        let summary = lines
            .iter()
            .position(|l| l == "  CHAIN REFERENCES")
            .expect("summary heading");
        let rows = &lines[summary..];

        let row = |name: &str| {
            rows.iter()
                .find(|l| l.contains(name))
                .map(|l| l.split_whitespace().collect::<Vec<_>>())
                .expect("chain row")
        };
        assert_eq!(row("Forward_Medium").last(), Some(&"2"));
        assert_eq!(row("Forward6_Medium").last(), Some(&"1"));
        assert_eq!(row("Unreferenced").last(), Some(&"0"));
    }

    #[test]
    fn test_narrow_render_keeps_width() {
        let report = render(40);
        for line in report.lines() {
            if line.starts_with(['╔', '║', '╚', '┌', '│', '├', '└']) {
                assert_eq!(display_width(line), 40, "{line}");
            }
        }
    }
}
