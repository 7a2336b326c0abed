//! Integration tests for the ReportBuilder API

use std::{fs, io::Write};

use dmviz::{
    DmvizError, ReportBuilder,
    config::{AppConfig, RenderConfig},
    draw::{GlyphSet, display_width},
    visualize::{find_visualizer, visualizers},
};

const FIREWALL_DUMP: &str = r#"
Device.Firewall.
Device.Firewall.Enable=1
Device.Firewall.PolicyLevel="Device.Firewall.Level.1."
Device.Firewall.ChainNumberOfEntries=3
Device.Firewall.Level.1.Alias="Medium"
Device.Firewall.Policy.1.Alias="wan2lan"
Device.Firewall.Policy.1.Enable=1
Device.Firewall.Policy.1.Chain="WAN2LAN_medium, IPV6_WAN2LAN_medium,"
Device.Firewall.Chain.1.Name="Forward_L_Medium"
Device.Firewall.Chain.1.Alias="WAN2LAN_medium"
Device.Firewall.Chain.1.Enable=1
Device.Firewall.Chain.2.Name="Forward6_L_Medium"
Device.Firewall.Chain.2.Alias="IPV6_WAN2LAN_medium"
Device.Firewall.Chain.3.Name="Orphan"
Device.Firewall.Chain.3.Alias="orphan"
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = ReportBuilder::default();
    let _builder = ReportBuilder::new(AppConfig::default());
}

#[test]
fn test_parse_and_render_every_visualizer() {
    let builder = ReportBuilder::default();
    let map = builder.parse(FIREWALL_DUMP);
    assert_eq!(map.value("Device.Firewall.Chain.1.Name"), Some("Forward_L_Medium"));

    for visualizer in visualizers() {
        for width in [40, 80, 120] {
            let report = builder.render(*visualizer, &map, width);
            assert!(!report.is_empty(), "{} rendered nothing", visualizer.name());
        }
    }
}

#[test]
fn test_summary_lists_unreferenced_chain() {
    let builder = ReportBuilder::default();
    let map = builder.parse(FIREWALL_DUMP);

    let report = builder
        .render_by_name("show_firewall_policies", &map, 120)
        .expect("visualizer exists");
    let lines = report.lines();
    let summary = lines
        .iter()
        .position(|line| line.contains("CHAIN REFERENCES"))
        .expect("summary heading");

    for name in ["Forward_L_Medium", "Forward6_L_Medium", "Orphan"] {
        assert!(
            lines[summary..].iter().any(|line| line.contains(name)),
            "{name} missing from summary"
        );
    }
}

#[test]
fn test_render_by_name_errors() {
    let builder = ReportBuilder::default();
    let map = builder.parse("");

    let err = builder.render_by_name("show_nothing", &map, 80).unwrap_err();
    assert!(matches!(err, DmvizError::UnknownVisualizer { .. }));
    assert!(err.is_usage());

    let err = builder.render_by_name("show_firewall", &map, 80).unwrap_err();
    assert!(matches!(err, DmvizError::AmbiguousVisualizer { .. }));
}

#[test]
fn test_load_missing_file_is_fatal() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let missing = dir.path().join("DM.txt");

    let err = ReportBuilder::default().load(&missing).unwrap_err();
    match err {
        DmvizError::InputNotFound { path, .. } => assert_eq!(path, missing),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
}

#[test]
fn test_load_skips_malformed_lines() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "# comment").unwrap();
    writeln!(file, "Device.Logical.Interface.1.").unwrap();
    writeln!(file, "Device.Logical.Interface.1.Name=\"wan\"").unwrap();
    writeln!(file, "not an assignment = at all").unwrap();

    let map = ReportBuilder::default().load(file.path()).expect("Failed to load dump");
    assert_eq!(map.len(), 1);
    assert_eq!(map.value("Device.Logical.Interface.1.Name"), Some("wan"));
}

#[test]
fn test_load_invalid_utf8_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("DM.txt");
    fs::write(&path, b"Device.A.B=\xff\n").expect("Failed to write dump");

    let err = ReportBuilder::default().load(&path).unwrap_err();
    assert!(matches!(err, DmvizError::Io(_)));
}

#[test]
fn test_ascii_glyphs_from_config() {
    let config = AppConfig::new(RenderConfig::default().with_glyphs(GlyphSet::Ascii));
    let builder = ReportBuilder::new(config);
    let map = builder.parse(FIREWALL_DUMP);

    let visualizer = find_visualizer("show_firewall_rules").expect("visualizer exists");
    let report = builder.render(visualizer, &map, 80);
    assert!(report.contains("+ Chain 1: Forward_L_Medium (WAN2LAN_medium)"));
    assert!(report.contains("- Chain 2: Forward6_L_Medium (IPV6_WAN2LAN_medium)"));
    assert!(!report.contains("🟢"));
}

#[test]
fn test_bordered_lines_match_width() {
    let builder = ReportBuilder::default();
    let map = builder.parse(FIREWALL_DUMP);

    for visualizer in visualizers() {
        for width in [50, 89, 90, 132] {
            let report = builder.render(*visualizer, &map, width);
            for line in report.lines() {
                if line.starts_with(['╔', '║', '╠', '╚', '┌', '│', '├', '└']) {
                    assert_eq!(display_width(line), width, "{}: {line}", visualizer.name());
                }
            }
        }
    }
}
