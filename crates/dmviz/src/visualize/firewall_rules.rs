//! `show_firewall_rules`: every `Device.Firewall.Chain` with its rules.

use dmviz_core::{
    attributes::ALIAS,
    draw::{BorderStyle, Card, Layout, PLACEHOLDER, Status, Table},
    path::InstancePath,
};

use super::{FIREWALL, FIREWALL_CHAIN, FIREWALL_LEVEL, NAME, RULE, RenderContext, Visualizer};
use crate::report::Report;

/// Wildcard value of TR-181 protocol and port attributes.
const ANY: &str = "-1";

/// Maps an IP protocol number to its name.
fn protocol_name(raw: &str) -> String {
    let name = match raw.trim() {
        "6" => "TCP",
        "17" => "UDP",
        "1" => "ICMP",
        "58" => "ICMPv6",
        ANY => "any",
        other => return format!("proto:{other}"),
    };
    name.to_string()
}

/// `port`, `port-max`, or `*` for an absent or wildcard port.
fn port_range(port: Option<&str>, max: Option<&str>) -> String {
    match port.map(str::trim) {
        None | Some(ANY) => "*".to_string(),
        Some(port) => match max.map(str::trim) {
            Some(max) if max != ANY => format!("{port}-{max}"),
            _ => port.to_string(),
        },
    }
}

struct RuleView<'a> {
    order: i64,
    alias: &'a str,
    target: &'a str,
    jump: Option<String>,
    protocol: String,
    dest_port: String,
    src_port: String,
    src_ip: &'a str,
    dest_ip: &'a str,
    state: Option<&'a str>,
}

impl<'a> RuleView<'a> {
    fn read(ctx: &RenderContext<'a>, path: &InstancePath, id: u32) -> Self {
        let target = ctx.text(path, "Target");
        let jump = (Status::from_target(target) == Status::Jump)
            .then(|| ctx.value(path, "TargetChain"))
            .flatten()
            .map(|raw| ctx.reference_label(Some(raw), FIREWALL_CHAIN));

        Self {
            order: ctx
                .value(path, "Order")
                .and_then(|order| order.trim().parse().ok())
                .unwrap_or_else(|| i64::from(id)),
            alias: ctx.text(path, ALIAS),
            target,
            jump,
            protocol: protocol_name(ctx.value(path, "Protocol").unwrap_or(ANY)),
            dest_port: port_range(ctx.value(path, "DestPort"), ctx.value(path, "DestPortRangeMax")),
            src_port: port_range(ctx.value(path, "SourcePort"), ctx.value(path, "SourcePortRangeMax")),
            src_ip: ctx.value(path, "SourceIP").unwrap_or("*"),
            dest_ip: ctx.value(path, "DestIP").unwrap_or("*"),
            state: ctx.value(path, "ConnectionState"),
        }
    }

    fn target_label(&self, ctx: &RenderContext<'_>) -> String {
        let glyph = ctx.glyph(Status::from_target(self.target));
        match &self.jump {
            Some(chain) => format!("{glyph} {} → {chain}", self.target),
            None => format!("{glyph} {}", self.target),
        }
    }

    fn compact_line(&self, ctx: &RenderContext<'_>) -> String {
        let mut line = format!(
            "#{} {}  {}  {}",
            self.order,
            self.alias,
            self.target_label(ctx),
            self.protocol
        );

        let mut details = Vec::new();
        if self.dest_port != "*" {
            details.push(format!("dst:{}", self.dest_port));
        }
        if self.src_port != "*" {
            details.push(format!("src:{}", self.src_port));
        }
        if self.src_ip != "*" {
            details.push(format!("from:{}", self.src_ip));
        }
        if self.dest_ip != "*" {
            details.push(format!("to:{}", self.dest_ip));
        }
        if let Some(state) = self.state {
            details.push(format!("state:{state}"));
        }
        if !details.is_empty() {
            line.push_str("  ");
            line.push_str(&details.join(" "));
        }
        line
    }
}

struct ChainView<'a> {
    id: u32,
    name: &'a str,
    alias: &'a str,
    status: Status,
    rule_count: String,
    rules: Vec<RuleView<'a>>,
}

impl<'a> ChainView<'a> {
    fn read(ctx: &RenderContext<'a>, id: u32) -> Self {
        let path = InstancePath::new(FIREWALL_CHAIN).instance(id);
        let rules_prefix = path.child(RULE);

        let mut rules: Vec<(u32, RuleView<'a>)> = ctx
            .map()
            .list_instance_ids(rules_prefix.as_str())
            .into_iter()
            .map(|rule_id| (rule_id, RuleView::read(ctx, &rules_prefix.instance(rule_id), rule_id)))
            .collect();
        rules.sort_by_key(|(rule_id, rule)| (rule.order, *rule_id));

        let rule_count = ctx
            .value(&path, "RuleNumberOfEntries")
            .map_or_else(|| rules.len().to_string(), str::to_string);

        Self {
            id,
            name: ctx.text(&path, NAME),
            alias: ctx.text(&path, ALIAS),
            status: Status::from_flag(ctx.value(&path, "Enable")),
            rule_count,
            rules: rules.into_iter().map(|(_, rule)| rule).collect(),
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, report: &mut Report) {
        let mut card = Card::new(BorderStyle::Single)
            .with_header_line(format!(
                "{} Chain {}: {} ({})",
                ctx.glyph(self.status),
                self.id,
                self.name,
                self.alias
            ))
            .with_header_line(format!("Rules: {}", self.rule_count));

        if self.rules.is_empty() {
            card.push_body("(no rules)");
        } else {
            match ctx.layout() {
                Layout::Wide => {
                    let mut table = Table::new([
                        "#", "Alias", "Target", "Proto", "DPort", "SPort", "SrcIP", "DstIP", "State",
                    ]);
                    for rule in &self.rules {
                        table.push_row([
                            rule.order.to_string(),
                            rule.alias.to_string(),
                            rule.target_label(ctx),
                            rule.protocol.clone(),
                            rule.dest_port.clone(),
                            rule.src_port.clone(),
                            rule.src_ip.to_string(),
                            rule.dest_ip.to_string(),
                            rule.state.unwrap_or(PLACEHOLDER).to_string(),
                        ]);
                    }
                    for line in table.render(Layout::Wide, ctx.width()) {
                        card.push_body(line);
                    }
                }
                Layout::Compact => {
                    for rule in &self.rules {
                        card.push_body(rule.compact_line(ctx));
                    }
                }
            }
        }

        report.extend(card.render(ctx.width()));
        report.blank();
    }
}

/// Firewall overview, one card per chain and a chain summary.
#[derive(Debug, Clone, Copy)]
pub struct FirewallRules;

impl FirewallRules {
    fn render_overview(ctx: &RenderContext<'_>, report: &mut Report) {
        let card = Card::new(BorderStyle::Double)
            .with_title("TR-181 FIREWALL OVERVIEW")
            .with_body_line(format!(
                "Enable: {}  Type: {}  Config: {}",
                ctx.text(FIREWALL, "Enable"),
                ctx.text(FIREWALL, "Type"),
                ctx.text(FIREWALL, "Config")
            ))
            .with_body_line(format!(
                "Policy: {}",
                ctx.reference_label(ctx.value(FIREWALL, "PolicyLevel"), FIREWALL_LEVEL)
            ))
            .with_body_line(format!("Chains: {}", ctx.text(FIREWALL, "ChainNumberOfEntries")));

        report.extend(card.render(ctx.width()));
        report.blank();
    }

    fn render_summary(ctx: &RenderContext<'_>, chains: &[ChainView<'_>], report: &mut Report) {
        ctx.section_heading(report, "CHAIN SUMMARY");

        let mut table = Table::new(["ID", "Name", "Alias", "En", "Rules"]);
        for chain in chains {
            table.push_row([
                chain.id.to_string(),
                chain.name.to_string(),
                chain.alias.to_string(),
                ctx.glyph(chain.status).to_string(),
                chain.rule_count.clone(),
            ]);
        }
        report.extend(table.render(ctx.layout(), ctx.width()));
        report.blank();
    }
}

impl Visualizer for FirewallRules {
    fn name(&self) -> &'static str {
        "show_firewall_rules"
    }

    fn description(&self) -> &'static str {
        "Firewall chains and their rules, ordered by rule Order"
    }

    fn render(&self, ctx: &RenderContext<'_>, report: &mut Report) {
        Self::render_overview(ctx, report);

        let chains: Vec<ChainView<'_>> = ctx
            .map()
            .list_instance_ids(FIREWALL_CHAIN)
            .into_iter()
            .map(|id| ChainView::read(ctx, id))
            .collect();
        if chains.is_empty() {
            report.push("No firewall chains found.");
            return;
        }

        for chain in &chains {
            chain.render(ctx, report);
        }
        Self::render_summary(ctx, &chains, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmviz_core::{
        attributes::AttributeMap,
        draw::{Theme, display_width},
    };

    const DUMP: &str = r#"
Device.Firewall.Enable=1
Device.Firewall.Type="Stateful"
Device.Firewall.PolicyLevel="Device.Firewall.Level.2."
Device.Firewall.ChainNumberOfEntries=2
Device.Firewall.Level.2.Alias="Medium"
Device.Firewall.Chain.1.Name="Forward_L_Medium"
Device.Firewall.Chain.1.Alias="WAN2LAN_medium"
Device.Firewall.Chain.1.Enable=1
Device.Firewall.Chain.1.RuleNumberOfEntries=3
Device.Firewall.Chain.1.Rule.1.Alias="ssh"
Device.Firewall.Chain.1.Rule.1.Order=20
Device.Firewall.Chain.1.Rule.1.Target="Accept"
Device.Firewall.Chain.1.Rule.1.Protocol=6
Device.Firewall.Chain.1.Rule.1.DestPort=22
Device.Firewall.Chain.1.Rule.2.Alias="web"
Device.Firewall.Chain.1.Rule.2.Order=10
Device.Firewall.Chain.1.Rule.2.Target="Drop"
Device.Firewall.Chain.1.Rule.2.Protocol=17
Device.Firewall.Chain.1.Rule.2.DestPort=8000
Device.Firewall.Chain.1.Rule.2.DestPortRangeMax=8080
Device.Firewall.Chain.1.Rule.2.SourceIP="10.0.0.0/8"
Device.Firewall.Chain.1.Rule.3.Alias="jump"
Device.Firewall.Chain.1.Rule.3.Order=30
Device.Firewall.Chain.1.Rule.3.Target="TargetChain"
Device.Firewall.Chain.1.Rule.3.TargetChain="Device.Firewall.Chain.2."
Device.Firewall.Chain.1.Rule.3.Protocol=47
Device.Firewall.Chain.2.Name="Custom"
Device.Firewall.Chain.2.Alias="custom"
Device.Firewall.Chain.2.Enable=0
"#;

    fn render(map: &AttributeMap, width: usize) -> Report {
        let theme = Theme::default();
        let ctx = RenderContext::new(map, &theme, width);
        let mut report = Report::new();
        FirewallRules.render(&ctx, &mut report);
        report
    }

    #[test]
    fn test_protocol_name() {
        assert_eq!(protocol_name("6"), "TCP");
        assert_eq!(protocol_name("58"), "ICMPv6");
        assert_eq!(protocol_name("-1"), "any");
        assert_eq!(protocol_name("47"), "proto:47");
    }

    #[test]
    fn test_port_range() {
        assert_eq!(port_range(None, None), "*");
        assert_eq!(port_range(Some("-1"), Some("90")), "*");
        assert_eq!(port_range(Some("80"), Some("-1")), "80");
        assert_eq!(port_range(Some("8000"), Some("8080")), "8000-8080");
    }

    #[test]
    fn test_compact_rules_follow_order() {
        let map = dmviz_parser::parse_str(DUMP);
        let report = render(&map, 80);
        let lines = report.lines();

        let web = lines.iter().position(|l| l.contains("#10 web")).expect("web rule");
        let ssh = lines.iter().position(|l| l.contains("#20 ssh")).expect("ssh rule");
        let jump = lines.iter().position(|l| l.contains("#30 jump")).expect("jump rule");
        assert!(web < ssh && ssh < jump);

        assert!(lines[web].contains("🚫 Drop  UDP  dst:8000-8080 from:10.0.0.0/8"));
        assert!(lines[jump].contains("→ Firewall.Chain.2 (custom)"));
        assert!(lines[jump].contains("proto:47"));
        assert!(report.contains("Policy: Firewall.Level.2 (Medium)"));
        assert!(report.contains("(no rules)"));
    }

    #[test]
    fn test_cards_fit_the_width() {
        let map = dmviz_parser::parse_str(DUMP);
        for width in [60, 80, 120] {
            let report = render(&map, width);
            for line in report.lines() {
                if line.starts_with(['╔', '║', '╚', '┌', '│', '├', '└']) {
                    assert_eq!(display_width(line), width, "{line}");
                }
            }
        }
    }

    #[test]
    fn test_wide_layout_uses_rule_table() {
        let map = dmviz_parser::parse_str(DUMP);
        let report = render(&map, 140);
        assert!(report.contains("DPort"));
        assert!(report.contains("8000-8080"));
        assert!(!report.contains("#10 web"));
    }

    #[test]
    fn test_summary_lists_every_chain() {
        let map = dmviz_parser::parse_str(DUMP);
        let report = render(&map, 120);
        let summary = report
            .lines()
            .iter()
            .position(|l| l == "  CHAIN SUMMARY")
            .expect("summary heading");
        let rows = &report.lines()[summary..];
        assert!(rows.iter().any(|l| l.contains("Forward_L_Medium") && l.contains("🟢")));
        assert!(rows.iter().any(|l| l.contains("Custom") && l.contains("🔴")));
    }

    #[test]
    fn test_missing_firewall() {
        let map = dmviz_parser::parse_str("Device.DeviceInfo.Manufacturer=x\n");
        let report = render(&map, 80);
        assert!(report.contains("Enable: -  Type: -  Config: -"));
        assert_eq!(report.lines().last().map(String::as_str), Some("No firewall chains found."));
    }
}
