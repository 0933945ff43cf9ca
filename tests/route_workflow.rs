// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route workflow integration test - hand-written graph end-to-end
//!
//! This test demonstrates the complete workflow over a two-component graph:
//! 1. Write a graph document directly into the data directory
//! 2. Inspect it with show
//! 3. Route within the connected component
//! 4. Observe the unreachable island in route and distances output
//! 5. Export with a route highlight

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Build a routeyard command bound to a temp data directory
fn routeyard(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("routeyard").unwrap();
    cmd.env("ROUTEYARD_DATA_DIR", data_dir.path());
    cmd
}

/// Set up a graph with a three-node chain and an isolated island node
fn setup_graph(data_dir: &TempDir) {
    let graph_json = r#"{
        "nodes": [
            {
                "kind": "Node",
                "id": "node:alpha",
                "label": "alpha",
                "position": { "x": 0.0, "y": 0.0 }
            },
            {
                "kind": "Node",
                "id": "node:beta",
                "label": "beta",
                "position": { "x": 100.0, "y": 0.0 }
            },
            {
                "kind": "Node",
                "id": "node:gamma",
                "label": "gamma",
                "position": { "x": 200.0, "y": 0.0 }
            },
            {
                "kind": "Node",
                "id": "node:island",
                "label": "island",
                "position": { "x": 0.0, "y": 300.0 }
            }
        ],
        "edges": [
            {
                "kind": "Edge",
                "id": "edge:ab",
                "from": "node:alpha",
                "to": "node:beta",
                "weight": 2.0
            },
            {
                "kind": "Edge",
                "id": "edge:bg",
                "from": "node:beta",
                "to": "node:gamma",
                "weight": 3.0
            },
            {
                "kind": "Edge",
                "id": "edge:ag",
                "from": "node:alpha",
                "to": "node:gamma",
                "weight": 10.0
            }
        ]
    }"#;

    std::fs::write(data_dir.path().join("graph.json"), graph_json).unwrap();
}

#[test]
fn test_show_reports_two_components() {
    let data_dir = TempDir::new().unwrap();
    setup_graph(&data_dir);

    routeyard(&data_dir)
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes (4):"))
        .stdout(predicate::str::contains("Edges (3):"))
        .stdout(predicate::str::contains("Components: 2"));
}

#[test]
fn test_route_prefers_chain_over_direct_edge() {
    let data_dir = TempDir::new().unwrap();
    setup_graph(&data_dir);

    // alpha→beta→gamma at cost 5 beats the direct alpha→gamma edge at 10
    routeyard(&data_dir)
        .args(["--no-color", "--quiet", "route", "alpha", "gamma"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route from alpha to gamma (distance 5.0):",
        ))
        .stdout(predicate::str::contains("alpha -> beta"))
        .stdout(predicate::str::contains("beta -> gamma"));
}

#[test]
fn test_route_json_preserves_walk_order() {
    let data_dir = TempDir::new().unwrap();
    setup_graph(&data_dir);

    let output = routeyard(&data_dir)
        .args(["--quiet", "route", "alpha", "gamma", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    // The raw path is ordered target→source
    assert_eq!(
        parsed["nodes"],
        serde_json::json!(["node:gamma", "node:beta", "node:alpha"])
    );
    assert_eq!(parsed["edges"], serde_json::json!(["edge:bg", "edge:ab"]));
}

#[test]
fn test_island_is_unreachable() {
    let data_dir = TempDir::new().unwrap();
    setup_graph(&data_dir);

    routeyard(&data_dir)
        .args(["--quiet", "route", "alpha", "island"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No route from alpha to island"));

    routeyard(&data_dir)
        .args(["--quiet", "distances", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("island  unreachable"))
        .stdout(predicate::str::contains("gamma  5.0"));
}

#[test]
fn test_export_highlights_computed_route() {
    let data_dir = TempDir::new().unwrap();
    setup_graph(&data_dir);

    let output = routeyard(&data_dir)
        .args([
            "--quiet", "export", "--format", "dot", "--route", "alpha", "gamma",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let dot = String::from_utf8_lossy(&output.stdout);

    // The cheap chain is highlighted, the expensive direct edge is not
    assert!(dot.contains("\"node:alpha\" -> \"node:beta\" [label=\"2\", color=blue, penwidth=2]"));
    assert!(dot.contains("\"node:beta\" -> \"node:gamma\" [label=\"3\", color=blue, penwidth=2]"));
    assert!(dot.contains("\"node:alpha\" -> \"node:gamma\" [label=\"10\"]"));
}
