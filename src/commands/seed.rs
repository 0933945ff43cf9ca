// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Seed command - writes the reference example graph to the data directory

use crate::graph::RouteGraph;
use crate::types::{Edge, Node, Position, StoreMeta};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Reference node layout: label and canvas position
const SEED_NODES: [(&str, f64, f64); 8] = [
    ("A", 100.0, 100.0),
    ("B", 500.0, 100.0),
    ("C", 200.0, 600.0),
    ("D", 700.0, 600.0),
    ("E", 350.0, 450.0),
    ("F", 350.0, 200.0),
    ("G", 590.0, 450.0),
    ("H", 50.0, 280.0),
];

/// Reference edge pairs as indices into `SEED_NODES`
const SEED_EDGES: [(usize, usize); 16] = [
    (0, 1),
    (0, 2),
    (0, 5),
    (0, 7),
    (1, 3),
    (2, 3),
    (2, 4),
    (3, 4),
    (4, 5),
    (5, 6),
    (5, 1),
    (5, 0),
    (6, 3),
    (6, 1),
    (7, 0),
    (7, 2),
];

/// Run the seed command
pub fn run(data_dir: &Path) -> Result<()> {
    info!("Seeding example graph");

    let mut graph = RouteGraph::new();

    let nodes: Vec<Node> = SEED_NODES
        .iter()
        .map(|(label, x, y)| Node::new(label, Position { x: *x, y: *y }))
        .collect();

    for node in &nodes {
        graph.add_node(node.clone());
    }

    for (from_idx, to_idx) in SEED_EDGES {
        let from = &nodes[from_idx];
        let to = &nodes[to_idx];
        // Edge weight is the straight-line distance between endpoints,
        // rounded to one decimal
        let weight = round_weight(from.position.distance_to(&to.position));
        graph
            .add_edge(Edge::new(&from.id, &to.id, weight))
            .with_context(|| format!("Failed to add edge {} -> {}", from.label, to.label))?;
    }

    graph.store.meta = Some(StoreMeta {
        generated_by: "seed".into(),
        generated_at: Utc::now(),
    });

    graph
        .save(data_dir)
        .with_context(|| format!("Failed to save graph to {}", data_dir.display()))?;

    println!(
        "Seeded example graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    println!("Graph saved to {}", data_dir.display());

    Ok(())
}

fn round_weight(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
