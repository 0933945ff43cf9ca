// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route command - computes and prints the shortest path between two nodes

use crate::graph::RouteGraph;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::info;

/// Run the route command
pub fn run(data_dir: &Path, from: &str, to: &str, json: bool, color: bool) -> Result<()> {
    let graph = RouteGraph::load(data_dir)
        .with_context(|| format!("Failed to load graph from {}", data_dir.display()))?;

    if graph.is_empty() {
        anyhow::bail!("Graph is empty. Run 'routeyard seed' first.");
    }

    let from_id = resolve_node_id(&graph, from)?;
    let to_id = resolve_node_id(&graph, to)?;

    info!("Routing {} -> {}", from_id, to_id);

    let mut engine = graph.engine();
    engine.set_source(&from_id);
    engine.analyze()?;

    let path = engine.shortest_path_to(&to_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    let from_label = node_label(&graph, &from_id);
    let to_label = node_label(&graph, &to_id);

    // A single-node path is either the reflexive query or an unreachable
    // target; the engine reports both the same way
    if path.edges.is_empty() {
        if from_id == to_id {
            println!("Already at {}", from_label);
        } else {
            println!("No route from {} to {}", from_label, to_label);
        }
        return Ok(());
    }

    let total = engine.distance_to(&to_id)?;
    println!("Route from {} to {} (distance {:.1}):", from_label, to_label, total);

    // The engine returns target→source order; display source→target
    let hops: Vec<&String> = path.nodes.iter().rev().collect();
    let hop_edges: Vec<&String> = path.edges.iter().rev().collect();

    for (i, edge_id) in hop_edges.iter().enumerate() {
        let weight = graph.get_edge(edge_id).map_or(0.0, |e| e.weight);
        let leg_from = node_label(&graph, hops[i]);
        let leg_to = node_label(&graph, hops[i + 1]);
        println!(
            "  {} -> {}  [{:.1}]",
            paint(&leg_from, i, hops.len() - 1, color),
            paint(&leg_to, i + 1, hops.len() - 1, color),
            weight
        );
    }

    Ok(())
}

/// Color a hop label by its role: source green, target red, interior blue
fn paint(label: &str, index: usize, last: usize, color: bool) -> String {
    if !color {
        return label.to_string();
    }
    if index == 0 {
        label.green().to_string()
    } else if index == last {
        label.red().to_string()
    } else {
        label.blue().to_string()
    }
}

/// Display label for a node, falling back to the raw ID
fn node_label(graph: &RouteGraph, id: &str) -> String {
    graph
        .get_node(id)
        .map_or_else(|| id.to_string(), |n| n.label.clone())
}

/// Resolve a node label or ID to a full ID
fn resolve_node_id(graph: &RouteGraph, label_or_id: &str) -> Result<String> {
    // If it looks like a full ID, use it directly
    if label_or_id.starts_with("node:") {
        if graph.get_node(label_or_id).is_some() {
            return Ok(label_or_id.to_string());
        }
        anyhow::bail!("Node not found: {}", label_or_id);
    }

    // Otherwise, search by label
    let matches: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|n| n.label == label_or_id)
        .collect();

    match matches.len() {
        0 => anyhow::bail!("No node found: {}", label_or_id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple nodes match '{}':", label_or_id);
            for n in &matches {
                eprintln!("  {} ({})", n.label, n.id);
            }
            anyhow::bail!("Ambiguous node label. Use full ID.");
        }
    }
}
