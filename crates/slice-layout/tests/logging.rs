//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations, and that layout runs cleanly with a
//! subscriber installed.

use slice_layout::core::logging::{init_logging, LogFormat, LogSettings};
use slice_layout::prelude::*;
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_settings_accept_filter_directives() {
    let settings =
        LogSettings::resolve(Some("info,slice_layout::engine::ordering=trace"), Some("pretty")).unwrap();
    assert_eq!(settings.directive, "info,slice_layout::engine::ordering=trace");
    assert_eq!(settings.format, LogFormat::Pretty);
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call installs a subscriber; the rest fail gracefully
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("info"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
}

#[test]
fn test_init_logging_with_formats() {
    let _ = init_logging(Some("info"), Some("compact"));
    let _ = init_logging(Some("info"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_layout_with_tracing_enabled() {
    let _ = init_logging(Some("trace"), Some("compact"));

    let nodes = vec![
        Node::new("network-1", NodeKind::Network),
        Node::new("cell-area-1", NodeKind::CellArea),
        Node::new("rrp-unlinked", NodeKind::Rrp),
    ];
    let edges = vec![
        Edge::new("network-1", "cell-area-1"),
        Edge::new("cell-area-1", "missing"),
    ];

    for config in [
        LayoutConfig::balanced_tree(),
        LayoutConfig::horizontal(),
        LayoutConfig::grid_rows(),
        LayoutConfig::default(),
    ] {
        let arrangement = arrange_detailed(&nodes, &edges, &config).unwrap();
        assert_eq!(arrangement.nodes.len(), 3);
        assert_eq!(arrangement.dropped_edges.len(), 1);
    }
}
