// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Show command - lists nodes, edges, and structure stats

use crate::graph::RouteGraph;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the show command
pub fn run(data_dir: &Path) -> Result<()> {
    let graph = RouteGraph::load(data_dir)
        .with_context(|| format!("Failed to load graph from {}", data_dir.display()))?;

    if graph.is_empty() {
        println!("Graph is empty. Run 'routeyard seed' to create the example graph.");
        return Ok(());
    }

    if let Some(meta) = &graph.store.meta {
        println!(
            "Graph generated by '{}' at {}",
            meta.generated_by, meta.generated_at
        );
        println!();
    }

    println!("Nodes ({}):", graph.node_count());
    for node in graph.nodes() {
        println!(
            "  {} [{}] at ({}, {})",
            node.label, node.id, node.position.x, node.position.y
        );
    }

    println!();
    println!("Edges ({}):", graph.edge_count());
    for edge in graph.edges() {
        let from_label = graph
            .get_node(&edge.from)
            .map_or(edge.from.as_str(), |n| n.label.as_str());
        let to_label = graph
            .get_node(&edge.to)
            .map_or(edge.to.as_str(), |n| n.label.as_str());
        println!("  {} -> {}  [{:.1}]", from_label, to_label, edge.weight);
    }

    println!();
    println!("Components: {}", graph.component_count());

    Ok(())
}
