//! WebAssembly bindings for the slice editor
//!
//! All functions exchange JSON strings; the editor owns the node objects
//! and only copies positions back.

use wasm_bindgen::prelude::*;

use crate::core::{CollisionConfig, Node, NodeKind, Position};
use crate::engine::find_free_position;

/// Initialize WASM module
///
/// Sets up the panic hook and routes `tracing` output to the browser
/// console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Arrange a graph document
///
/// # Arguments
/// * `graph_json` - `{ "nodes": [...], "edges": [...] }`
/// * `config_json` - layout options; empty for defaults
///
/// # Returns
/// * The graph document with positions filled in
/// * Throws a JavaScript error on malformed JSON or an invalid config
#[wasm_bindgen]
pub fn arrange_graph(graph_json: &str, config_json: &str) -> Result<String, JsValue> {
    crate::arrange_json(graph_json, config_json).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

/// Arrange a graph document and report how it went
///
/// Never throws. Returns JSON with `graph`, `outcome`, `droppedEdges` and
/// `error` (null on success).
#[wasm_bindgen]
pub fn arrange_graph_report(graph_json: &str, config_json: &str) -> String {
    let report = match crate::arrange_json_detailed(graph_json, config_json) {
        Ok((graph, arrangement)) => serde_json::json!({
            "graph": {
                "nodes": arrangement.nodes,
                "edges": graph.edges,
            },
            "outcome": arrangement.outcome,
            "droppedEdges": arrangement.dropped_edges,
            "error": null,
        }),
        Err(e) => serde_json::json!({
            "graph": null,
            "outcome": null,
            "droppedEdges": [],
            "error": format!("{:#}", e),
        }),
    };

    report.to_string()
}

/// Find a free spot for a node about to be dropped on the canvas
///
/// # Arguments
/// * `nodes_json` - array of the nodes already on the canvas
/// * `x`, `y` - where the user dropped the node
/// * `kind` - kind name of the new node, which decides its footprint
///
/// # Returns
/// * `{"x": .., "y": ..}`
/// * Throws a JavaScript error on malformed JSON or an unknown kind
#[wasm_bindgen]
pub fn free_position(nodes_json: &str, x: f64, y: f64, kind: &str) -> Result<String, JsValue> {
    let existing: Vec<Node> = serde_json::from_str(nodes_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse nodes JSON: {}", e)))?;
    let kind = NodeKind::from_name(kind)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown node kind: {}", kind)))?;

    let position = find_free_position(
        Position::new(x, y),
        kind.dimensions(),
        &existing,
        &CollisionConfig::default(),
    );

    serde_json::to_string(&position).map_err(|e| JsValue::from_str(&e.to_string()))
}
