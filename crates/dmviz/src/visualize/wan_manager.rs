//! `show_wan_manager`: WAN modes of the prplware WANManager and their interfaces.

use dmviz_core::{
    attributes::ALIAS,
    draw::{BorderStyle, Card, Layout, PLACEHOLDER, Status, Table},
    path::InstancePath,
};

use super::{RenderContext, Visualizer};
use crate::report::Report;

const WAN_MANAGER: &str = "Device.X_PRPLWARE-COM_WANManager";
const WAN_MODE: &str = "Device.X_PRPLWARE-COM_WANManager.WAN";
const INTF: &str = "Intf";

struct IntfView<'a> {
    id: u32,
    path: InstancePath,
    alias: &'a str,
    ipv4_mode: &'a str,
    ipv6_mode: &'a str,
    kind: &'a str,
    vlan: &'a str,
}

impl<'a> IntfView<'a> {
    fn read(ctx: &RenderContext<'a>, path: InstancePath, id: u32) -> Self {
        let kind = ctx.text(&path, "Type");
        let vlan = if kind == "vlan" {
            ctx.text(&path, "VlanID")
        } else {
            PLACEHOLDER
        };
        Self {
            id,
            alias: ctx.text(&path, ALIAS),
            ipv4_mode: ctx.text(&path, "IPv4Mode"),
            ipv6_mode: ctx.text(&path, "IPv6Mode"),
            kind,
            vlan,
            path,
        }
    }

    fn reference(&self, ctx: &RenderContext<'_>, attr: &str) -> String {
        ctx.reference_label(ctx.value(&self.path, attr), "")
    }

    /// `IPv4→… | Route→…` for the references that are set.
    fn reference_line(&self, ctx: &RenderContext<'_>) -> Option<String> {
        let refs: Vec<String> = [
            ("IPv4", "IPv4Reference"),
            ("DHCPv4", "DHCPv4Reference"),
            ("DHCPv6", "DHCPv6Reference"),
            ("Route", "DefaultRouteReference"),
        ]
        .into_iter()
        .filter(|(_, attr)| ctx.value(&self.path, attr).is_some())
        .map(|(label, attr)| format!("{label}→{}", self.reference(ctx, attr)))
        .collect();

        (!refs.is_empty()).then(|| format!("  {}", refs.join(" | ")))
    }
}

struct ModeView<'a> {
    id: u32,
    path: InstancePath,
    alias: &'a str,
    status: &'a str,
    phys_type: &'a str,
    dns: &'a str,
    ipv6_dns: &'a str,
    sensing: bool,
    active: bool,
    intfs: Vec<IntfView<'a>>,
}

impl<'a> ModeView<'a> {
    fn read(ctx: &RenderContext<'a>, id: u32, active_mode: Option<&str>) -> Self {
        let path = InstancePath::new(WAN_MODE).instance(id);
        let intf_prefix = path.child(INTF);
        let intfs = ctx
            .map()
            .list_instance_ids(intf_prefix.as_str())
            .into_iter()
            .map(|intf_id| IntfView::read(ctx, intf_prefix.instance(intf_id), intf_id))
            .collect();
        let alias = ctx.text(&path, ALIAS);

        Self {
            id,
            alias,
            status: ctx.text(&path, "Status"),
            phys_type: ctx.text(&path, "PhysicalType"),
            dns: ctx.text(&path, "DNSMode"),
            ipv6_dns: ctx.text(&path, "IPv6DNSMode"),
            sensing: Status::from_flag(ctx.value(&path, "EnableSensing")) == Status::Enabled,
            active: active_mode.is_some_and(|mode| mode == alias),
            intfs,
            path,
        }
    }

    fn status(&self) -> Status {
        Status::enabled(self.status != "Disabled")
    }

    fn sensing_glyph(&self, ctx: &RenderContext<'_>) -> &'static str {
        if self.sensing { ctx.glyph(Status::Sensing) } else { "  " }
    }

    fn render(&self, ctx: &RenderContext<'_>, report: &mut Report) {
        let active = if self.active {
            format!(" {} ACTIVE", ctx.glyph(Status::Active))
        } else {
            String::new()
        };
        let physical = format!(
            "Physical: {}  Ref: {}  {} Sensing",
            self.phys_type,
            ctx.reference_label(ctx.value(&self.path, "PhysicalReference"), ""),
            self.sensing_glyph(ctx)
        );
        let dns = format!("DNS: {}  IPv6DNS: {}  Status: {}", self.dns, self.ipv6_dns, self.status);

        let mut card = Card::new(BorderStyle::Single).with_header_line(format!(
            "{} WAN.{}: {}{active}",
            ctx.glyph(self.status()),
            self.id,
            self.alias
        ));
        let layout = ctx.layout();
        match layout {
            Layout::Wide => card.push_header(format!("{physical}  {dns}")),
            Layout::Compact => {
                card.push_header(physical);
                card.push_header(dns);
            }
        }

        if self.intfs.is_empty() {
            card.push_body("(no interfaces)");
        } else if layout.is_wide() {
            let mut table = Table::new(["Intf", "Alias", "IPv4Mode", "IPv6Mode", "Type", "VLAN", "IPv4Ref", "DefRoute"]);
            for intf in &self.intfs {
                table.push_row([
                    intf.id.to_string(),
                    intf.alias.to_string(),
                    intf.ipv4_mode.to_string(),
                    intf.ipv6_mode.to_string(),
                    intf.kind.to_string(),
                    intf.vlan.to_string(),
                    intf.reference(ctx, "IPv4Reference"),
                    intf.reference(ctx, "DefaultRouteReference"),
                ]);
            }
            for line in table.render(Layout::Wide, ctx.width()) {
                card.push_body(line);
            }
        } else {
            for intf in &self.intfs {
                let mut line = format!(
                    "Intf.{} \"{}\"  IPv4:{}  IPv6:{}  {}",
                    intf.id, intf.alias, intf.ipv4_mode, intf.ipv6_mode, intf.kind
                );
                if intf.vlan != PLACEHOLDER {
                    line.push_str(&format!(" vlan:{}", intf.vlan));
                }
                card.push_body(line);
                if let Some(refs) = intf.reference_line(ctx) {
                    card.push_body(refs);
                }
            }
        }

        report.extend(card.render(ctx.width()));
        report.blank();
    }
}

/// WANManager overview, one card per WAN mode and a mode summary.
#[derive(Debug, Clone, Copy)]
pub struct WanManager;

impl WanManager {
    fn render_overview(ctx: &RenderContext<'_>, report: &mut Report) {
        let timeout = ctx
            .value(WAN_MANAGER, "SensingTimeout")
            .map_or_else(|| PLACEHOLDER.to_string(), |seconds| format!("{seconds}s"));
        let card = Card::new(BorderStyle::Double)
            .with_title("WAN MANAGER OVERVIEW")
            .with_body_line(format!(
                "OperationMode: {}   SensingPolicy: {}   SensingTimeout: {timeout}",
                ctx.text(WAN_MANAGER, "OperationMode"),
                ctx.text(WAN_MANAGER, "SensingPolicy")
            ))
            .with_body_line(format!("Active WANMode: {}", ctx.text(WAN_MANAGER, "WANMode")));

        report.extend(card.render(ctx.width()));
        report.blank();
    }

    fn render_summary(ctx: &RenderContext<'_>, modes: &[ModeView<'_>], report: &mut Report) {
        ctx.section_heading(report, "WAN MODE SUMMARY");

        let mut table = Table::new(["ID", "Alias", "PhysType", "Status", "DNS", "Sens", "Intfs"]);
        for mode in modes {
            let id = if mode.active {
                format!("{}{}", ctx.glyph(Status::Active), mode.id)
            } else {
                mode.id.to_string()
            };
            table.push_row([
                id,
                mode.alias.to_string(),
                mode.phys_type.to_string(),
                format!("{} {}", ctx.glyph(mode.status()), mode.status),
                mode.dns.to_string(),
                mode.sensing_glyph(ctx).trim().to_string(),
                mode.intfs.len().to_string(),
            ]);
        }
        report.extend(table.render(ctx.layout(), ctx.width()));
        report.blank();
    }
}

impl Visualizer for WanManager {
    fn name(&self) -> &'static str {
        "show_wan_manager"
    }

    fn description(&self) -> &'static str {
        "WANManager WAN modes and their interfaces"
    }

    fn render(&self, ctx: &RenderContext<'_>, report: &mut Report) {
        Self::render_overview(ctx, report);

        let active_mode = ctx.value(WAN_MANAGER, "WANMode");
        let modes: Vec<ModeView<'_>> = ctx
            .map()
            .list_instance_ids(WAN_MODE)
            .into_iter()
            .map(|id| ModeView::read(ctx, id, active_mode))
            .collect();
        if modes.is_empty() {
            report.push("No WANManager WAN modes found.");
            return;
        }

        for mode in &modes {
            mode.render(ctx, report);
        }
        Self::render_summary(ctx, &modes, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmviz_core::{attributes::AttributeMap, draw::Theme};

    const DUMP: &str = r#"
Device.X_PRPLWARE-COM_WANManager.OperationMode="Auto"
Device.X_PRPLWARE-COM_WANManager.SensingPolicy="Sequential"
Device.X_PRPLWARE-COM_WANManager.SensingTimeout=30
Device.X_PRPLWARE-COM_WANManager.WANMode="ethernet_dhcp"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Alias="ethernet_dhcp"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Status="Enabled"
Device.X_PRPLWARE-COM_WANManager.WAN.1.PhysicalType="Ethernet"
Device.X_PRPLWARE-COM_WANManager.WAN.1.PhysicalReference="Device.Ethernet.Interface.1."
Device.X_PRPLWARE-COM_WANManager.WAN.1.EnableSensing=1
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.Alias="data"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.IPv4Mode="dhcp4"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.Type="vlan"
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.VlanID=100
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.IPv4Reference="Device.IP.Interface.2."
Device.X_PRPLWARE-COM_WANManager.WAN.1.Intf.1.DefaultRouteReference="Device.Routing.Router.1.IPv4Forwarding.9."
Device.X_PRPLWARE-COM_WANManager.WAN.2.Alias="pppoe"
Device.X_PRPLWARE-COM_WANManager.WAN.2.Status="Disabled"
Device.Ethernet.Interface.1.Name="eth0"
Device.IP.Interface.2.Alias="wan"
"#;

    fn render(map: &AttributeMap, width: usize) -> Report {
        let theme = Theme::default();
        let ctx = RenderContext::new(map, &theme, width);
        let mut report = Report::new();
        WanManager.render(&ctx, &mut report);
        report
    }

    #[test]
    fn test_overview() {
        let map = dmviz_parser::parse_str(DUMP);
        let report = render(&map, 80);
        assert!(report.contains("OperationMode: Auto   SensingPolicy: Sequential   SensingTimeout: 30s"));
        assert!(report.contains("Active WANMode: ethernet_dhcp"));
    }

    #[test]
    fn test_compact_mode_cards() {
        let map = dmviz_parser::parse_str(DUMP);
        let report = render(&map, 80);
        assert!(report.contains("🟢 WAN.1: ethernet_dhcp ★ ACTIVE"));
        assert!(report.contains("Physical: Ethernet  Ref: Ethernet.Interface.1 (eth0)  📡 Sensing"));
        assert!(report.contains("Intf.1 \"data\"  IPv4:dhcp4  IPv6:-  vlan vlan:100"));
        assert!(report.contains("IPv4→IP.Interface.2 (wan) | Route→Routing.Router.1.IPv4Forwarding.9"));
        assert!(report.contains("🔴 WAN.2: pppoe"));
        assert!(report.contains("(no interfaces)"));
    }

    #[test]
    fn test_wide_mode_table_and_summary() {
        let map = dmviz_parser::parse_str(DUMP);
        let report = render(&map, 160);
        assert!(report.contains("IPv4Ref"));
        assert!(report.contains("📡 Sensing  DNS: -  IPv6DNS: -  Status: Enabled"));

        let summary = report
            .lines()
            .iter()
            .position(|l| l == "  WAN MODE SUMMARY")
            .expect("summary heading");
        let rows = &report.lines()[summary..];
        assert!(rows.iter().any(|l| l.starts_with("  ★1 ") && l.contains("🟢 Enabled")));
        assert!(rows.iter().any(|l| l.starts_with("  2 ") && l.contains("🔴 Disabled")));
    }

    #[test]
    fn test_no_wan_modes() {
        let map = AttributeMap::default();
        let report = render(&map, 80);
        assert!(report.contains("SensingTimeout: -"));
        assert!(report.contains("No WANManager WAN modes found."));
    }
}
