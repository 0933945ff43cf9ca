// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - exports the route graph to various formats

use crate::graph::RouteGraph;
use crate::types::RoutePath;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// JSON format
    Json,
}

impl ExportFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Some(Self::Dot),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Run the export command
pub fn run(
    data_dir: &Path,
    format: &str,
    output: Option<PathBuf>,
    route: Option<(String, String)>,
) -> Result<()> {
    info!("Exporting to {}", format);

    let export_format = ExportFormat::from_str(format)
        .ok_or_else(|| anyhow::anyhow!("Unknown export format: {}. Supported: dot, json", format))?;

    let graph = RouteGraph::load(data_dir)
        .with_context(|| format!("Failed to load graph from {}", data_dir.display()))?;

    if graph.is_empty() {
        eprintln!("Warning: Graph is empty. Run 'routeyard seed' first.");
    }

    // Compute the highlight route if requested
    let highlight: Option<RoutePath> = match route {
        Some((from, to)) => {
            let from_id = resolve_node_id(&graph, &from)?;
            let to_id = resolve_node_id(&graph, &to)?;

            let mut engine = graph.engine();
            engine.set_source(&from_id);
            engine.analyze()?;
            Some(engine.shortest_path_to(&to_id)?)
        }
        None => None,
    };

    // Generate output
    let content = match export_format {
        ExportFormat::Dot => graph.to_dot(highlight.as_ref()),
        ExportFormat::Json => graph.to_json()?,
    };

    // Write output
    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            // Write to stdout
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
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
