// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Distances command - prints the full shortest-distance table from a source

use crate::graph::RouteGraph;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Run the distances command
pub fn run(data_dir: &Path, from: &str, json: bool) -> Result<()> {
    let graph = RouteGraph::load(data_dir)
        .with_context(|| format!("Failed to load graph from {}", data_dir.display()))?;

    if graph.is_empty() {
        anyhow::bail!("Graph is empty. Run 'routeyard seed' first.");
    }

    let from_id = resolve_node_id(&graph, from)?;

    info!("Computing distances from {}", from_id);

    let mut engine = graph.engine();
    engine.set_source(&from_id);
    engine.analyze()?;

    if json {
        // Unreachable nodes serialize as null
        let mut table: BTreeMap<String, Option<f64>> = BTreeMap::new();
        for node in graph.nodes() {
            let dist = engine.distance_to(&node.id)?;
            table.insert(node.label.clone(), dist.is_finite().then_some(dist));
        }
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let from_label = graph
        .get_node(&from_id)
        .map_or_else(|| from_id.clone(), |n| n.label.clone());
    println!("Distances from {}:", from_label);

    for node in graph.nodes() {
        let dist = engine.distance_to(&node.id)?;
        if dist.is_finite() {
            println!("  {}  {:.1}", node.label, dist);
        } else {
            println!("  {}  unreachable", node.label);
        }
    }

    Ok(())
}

/// Resolve a node label or ID to a full ID
fn resolve_node_id(graph: &RouteGraph, label_or_id: &str) -> Result<String> {
    if label_or_id.starts_with("node:") {
        if graph.get_node(label_or_id).is_some() {
            return Ok(label_or_id.to_string());
        }
        anyhow::bail!("Node not found: {}", label_or_id);
    }

    let matches: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|n| n.label == label_or_id)
        .collect();

    match matches.len() {
        0 => anyhow::bail!("No node found: {}", label_or_id),
        1 => Ok(matches[0].id.clone()),
        _ => anyhow::bail!("Ambiguous node label: {}. Use full ID.", label_or_id),
    }
}
