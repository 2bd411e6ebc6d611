//! Integration tests for the FlowDiagram API
//!
//! These tests drive the public API the way an embedding host would.

use std::fs;

use float_cmp::assert_approx_eq;
use tempfile::tempdir;

use stageflow::{
    FlowDiagram, StageflowError,
    anchor::Anchor,
    config::{AppConfig, NodeOverride},
    geometry::{ContainerSize, Point},
    icon::FileIconProvider,
    observer::HostContainer,
    segments::SegmentKey,
    topology::{DiagramVariant, NodeKey},
};

#[test]
fn test_default_diagram_needs_no_configuration() {
    let diagram = FlowDiagram::default();
    let geometry = diagram.geometry(ContainerSize::default());

    assert_eq!(geometry.nodes().iter().count(), 4);
    assert_eq!(geometry.segments().len(), 7);
    assert_eq!(diagram.timeline().len(), 11);
}

#[test]
fn test_render_default_diagram() {
    let diagram = FlowDiagram::default();
    let svg = diagram
        .render_svg(ContainerSize::new(920.0, 560.0))
        .expect("Failed to render diagram");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert_eq!(svg.matches("<line").count(), 7);
    assert_eq!(svg.matches("data-node=").count(), 4);
    for label in ["Agent Started", "Processing", "Analysing", "Report"] {
        assert!(svg.contains(label), "Missing label {label}");
    }
}

#[test]
fn test_diagram_from_toml_config() {
    let config: AppConfig = toml::from_str(
        r##"
        variant = "wide"

        [timing]
        node_fade = 0.5

        [style]
        easing = "linear"

        [[nodes]]
        key = "agent"
        label = "Agent"
        "##,
    )
    .expect("Failed to parse config");

    let diagram = FlowDiagram::new(config).expect("Failed to build diagram");
    let geometry = diagram.geometry(ContainerSize::new(920.0, 560.0));

    assert_eq!(
        geometry.nodes().center(NodeKey::Processing),
        Point::new(780.0, 110.0)
    );
    assert_eq!(geometry.nodes().get(NodeKey::Agent).label(), "Agent");
    assert_approx_eq!(
        f32,
        diagram.timeline().node(NodeKey::Agent).duration(),
        0.5
    );

    let svg = diagram
        .render_svg(ContainerSize::new(920.0, 560.0))
        .expect("Failed to render diagram");
    assert!(!svg.contains("keySplines"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config: AppConfig = toml::from_str(
        r##"
        [style]
        background_color = "definitely-not-a-color"
        "##,
    )
    .expect("Failed to parse config");

    let err = FlowDiagram::new(config).unwrap_err();
    assert!(matches!(err, StageflowError::Config(_)));
}

#[test]
fn test_unknown_anchor_override_falls_back_to_center() {
    let config = AppConfig::default().with_node_override(
        NodeOverride::new(NodeKey::Report).with_anchor(Anchor::from_tag("nowhere")),
    );
    let diagram = FlowDiagram::new(config).expect("Failed to build diagram");

    let center = diagram
        .geometry(ContainerSize::new(800.0, 600.0))
        .nodes()
        .center(NodeKey::Report);
    assert_eq!(center, Point::new(400.0, 190.0));
}

#[test]
fn test_mount_follows_host_and_unmounts_cleanly() {
    let diagram = FlowDiagram::default();
    let host = HostContainer::new(ContainerSize::new(800.0, 500.0));

    let mounted = diagram.mount(&host);
    assert_eq!(host.active_observers(), 1);

    host.resize(ContainerSize::new(1100.0, 500.0));
    let geometry = mounted.geometry();
    assert_eq!(geometry.size(), ContainerSize::new(1100.0, 500.0));
    assert_eq!(
        geometry.segments().get(SegmentKey::AgentAnalysing).end().x(),
        528.0
    );

    mounted.unmount();
    assert_eq!(host.active_observers(), 0);
}

#[test]
fn test_unmount_before_first_resize() {
    let diagram = FlowDiagram::default();
    let host = HostContainer::default();

    let mounted = diagram.mount(&host);
    mounted.unmount();

    assert_eq!(host.active_observers(), 0);
}

#[test]
fn test_instances_share_no_state() {
    let standard = FlowDiagram::default();
    let wide = FlowDiagram::new(AppConfig::default().with_variant(DiagramVariant::Wide))
        .expect("Failed to build diagram");
    let host = HostContainer::default();

    let first = standard.mount(&host);
    let second = wide.mount(&host);
    host.resize(ContainerSize::new(1000.0, 600.0));

    assert_eq!(first.recompute_count(), 2);
    assert_eq!(second.recompute_count(), 2);
    assert_ne!(
        first.geometry().nodes().center(NodeKey::Analysing),
        second.geometry().nodes().center(NodeKey::Analysing)
    );

    drop(first);
    assert_eq!(host.active_observers(), 1);
}

#[test]
fn test_file_icons_with_missing_files_render_placeholders() {
    let dir = tempdir().expect("Failed to create temp directory");
    fs::create_dir_all(dir.path().join("icons")).expect("Failed to create icons dir");
    fs::write(dir.path().join("icons/agent.svg"), "<svg/>").expect("Failed to write icon");

    let diagram = FlowDiagram::default();
    let svg = diagram
        .render_svg_with_icons(
            ContainerSize::default(),
            Box::new(FileIconProvider::new(dir.path())),
        )
        .expect("Failed to render diagram");

    assert_eq!(svg.matches("<image").count(), 1);
    assert_eq!(svg.matches("data-placeholder=\"true\"").count(), 3);
}
