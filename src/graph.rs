// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph document: persistent node/edge store with petgraph backing

use crate::engine::ShortestPathEngine;
use crate::types::{Edge, GraphStore, Node, RoutePath};
use anyhow::{Context, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The route graph with petgraph backing for structural queries
pub struct RouteGraph {
    /// The underlying directed graph
    graph: DiGraph<String, String>,
    /// Map from node ID to petgraph index
    node_indices: HashMap<String, NodeIndex>,
    /// The graph store (nodes, edges, provenance)
    pub store: GraphStore,
}

impl Default for RouteGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGraph {
    /// Create a new empty route graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            store: GraphStore::default(),
        }
    }

    /// Load the graph from a directory containing graph.json
    pub fn load(dir: &Path) -> Result<Self> {
        let graph_path = dir.join("graph.json");

        let store: GraphStore = if graph_path.exists() {
            let content = fs::read_to_string(&graph_path)
                .with_context(|| format!("Failed to read {}", graph_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", graph_path.display()))?
        } else {
            GraphStore::default()
        };

        let mut route_graph = Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            store,
        };

        // Build petgraph from store
        route_graph.rebuild_graph();

        Ok(route_graph)
    }

    /// Save the graph to a directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let graph_path = dir.join("graph.json");

        let graph_json =
            serde_json::to_string_pretty(&self.store).context("Failed to serialize graph")?;
        fs::write(&graph_path, graph_json)
            .with_context(|| format!("Failed to write {}", graph_path.display()))?;

        Ok(())
    }

    /// Rebuild the petgraph from the store
    fn rebuild_graph(&mut self) {
        self.graph.clear();
        self.node_indices.clear();

        for node in &self.store.nodes {
            let idx = self.graph.add_node(node.id.clone());
            self.node_indices.insert(node.id.clone(), idx);
        }

        for edge in &self.store.edges {
            if let (Some(&from_idx), Some(&to_idx)) = (
                self.node_indices.get(&edge.from),
                self.node_indices.get(&edge.to),
            ) {
                self.graph.add_edge(from_idx, to_idx, edge.id.clone());
            }
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) {
        if self.node_indices.contains_key(&node.id) {
            // Update existing node
            if let Some(existing) = self.store.nodes.iter_mut().find(|n| n.id == node.id) {
                *existing = node;
            }
        } else {
            // Add new node
            let idx = self.graph.add_node(node.id.clone());
            self.node_indices.insert(node.id.clone(), idx);
            self.store.nodes.push(node);
        }
    }

    /// Add an edge to the graph
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        // Verify both endpoints exist
        let from_idx = self
            .node_indices
            .get(&edge.from)
            .ok_or_else(|| anyhow::anyhow!("Source node not found: {}", edge.from))?;
        let to_idx = self
            .node_indices
            .get(&edge.to)
            .ok_or_else(|| anyhow::anyhow!("Target node not found: {}", edge.to))?;

        // Check if edge already exists
        if self.store.edges.iter().any(|e| e.id == edge.id) {
            return Ok(()); // Idempotent
        }

        self.graph.add_edge(*from_idx, *to_idx, edge.id.clone());
        self.store.edges.push(edge);

        Ok(())
    }

    /// Get a node by ID
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.store.nodes.iter().find(|n| n.id == id)
    }

    /// Get an edge by ID
    #[must_use]
    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.store.edges.iter().find(|e| e.id == id)
    }

    /// Get all nodes
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.store.nodes
    }

    /// Get all edges
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.store.edges
    }

    /// Get edges leaving a specific node
    #[must_use]
    pub fn edges_from(&self, node_id: &str) -> Vec<&Edge> {
        self.store
            .edges
            .iter()
            .filter(|e| e.from == node_id)
            .collect()
    }

    /// Get edges entering a specific node
    #[must_use]
    pub fn edges_to(&self, node_id: &str) -> Vec<&Edge> {
        self.store
            .edges
            .iter()
            .filter(|e| e.to == node_id)
            .collect()
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.store.nodes.len()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.store.edges.len()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.nodes.is_empty()
    }

    /// Number of weakly connected components. A count above one explains
    /// unreachable route targets.
    #[must_use]
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Build a shortest-path engine over a snapshot of this graph
    #[must_use]
    pub fn engine(&self) -> ShortestPathEngine {
        ShortestPathEngine::new(self.store.nodes.clone(), self.store.edges.clone())
    }

    /// Export to DOT format for Graphviz, optionally highlighting a route
    #[must_use]
    pub fn to_dot(&self, highlight: Option<&RoutePath>) -> String {
        let mut dot = String::from("digraph routes {\n");
        dot.push_str("  node [shape=circle];\n\n");

        // Add nodes
        for node in &self.store.nodes {
            let highlighted = highlight.is_some_and(|p| p.nodes.contains(&node.id));
            let attrs = if highlighted {
                ", style=filled, fillcolor=lightblue"
            } else {
                ""
            };
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\", pos=\"{},{}!\"{}];\n",
                node.id, node.label, node.position.x, node.position.y, attrs
            ));
        }

        dot.push('\n');

        // Add edges
        for edge in &self.store.edges {
            let highlighted = highlight.is_some_and(|p| p.edges.contains(&edge.id));
            let attrs = if highlighted {
                ", color=blue, penwidth=2"
            } else {
                ""
            };
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"{}];\n",
                edge.from, edge.to, edge.weight, attrs
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.store).context("Failed to serialize graph to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn make_test_node(label: &str, x: f64, y: f64) -> Node {
        Node::new(label, Position { x, y })
    }

    #[test]
    fn test_add_node() {
        let mut graph = RouteGraph::new();
        let node = make_test_node("A", 100.0, 100.0);

        graph.add_node(node.clone());

        assert_eq!(graph.node_count(), 1);
        assert!(graph.get_node(&node.id).is_some());
    }

    #[test]
    fn test_add_edge() {
        let mut graph = RouteGraph::new();
        let a = make_test_node("A", 0.0, 0.0);
        let b = make_test_node("B", 10.0, 0.0);

        graph.add_node(a.clone());
        graph.add_node(b.clone());

        let edge = Edge::new(&a.id, &b.id, 10.0);
        graph.add_edge(edge).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges_from(&a.id).len(), 1);
        assert_eq!(graph.edges_to(&b.id).len(), 1);
    }

    #[test]
    fn test_add_edge_rejects_dangling_endpoint() {
        let mut graph = RouteGraph::new();
        let a = make_test_node("A", 0.0, 0.0);
        graph.add_node(a.clone());

        let edge = Edge::new(&a.id, "node:missing", 1.0);
        assert!(graph.add_edge(edge).is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut graph = RouteGraph::new();
        let a = make_test_node("A", 0.0, 0.0);
        let b = make_test_node("B", 10.0, 0.0);
        graph.add_node(a.clone());
        graph.add_node(b.clone());

        graph.add_edge(Edge::new(&a.id, &b.id, 10.0)).unwrap();
        graph.add_edge(Edge::new(&a.id, &b.id, 10.0)).unwrap();

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_component_count() {
        let mut graph = RouteGraph::new();
        graph.add_node(make_test_node("A", 0.0, 0.0));
        graph.add_node(make_test_node("B", 10.0, 0.0));

        assert_eq!(graph.component_count(), 2);
    }

    #[test]
    fn test_to_dot() {
        let mut graph = RouteGraph::new();
        graph.add_node(make_test_node("A", 100.0, 200.0));

        let dot = graph.to_dot(None);

        assert!(dot.contains("digraph routes"));
        assert!(dot.contains("label=\"A\""));
        assert!(dot.contains("pos=\"100,200!\""));
    }

    #[test]
    fn test_to_dot_highlights_route() {
        let mut graph = RouteGraph::new();
        let a = make_test_node("A", 0.0, 0.0);
        let b = make_test_node("B", 10.0, 0.0);
        graph.add_node(a.clone());
        graph.add_node(b.clone());
        let edge = Edge::new(&a.id, &b.id, 10.0);
        graph.add_edge(edge.clone()).unwrap();

        let path = RoutePath {
            from: a.id.clone(),
            to: b.id.clone(),
            nodes: vec![b.id.clone(), a.id.clone()],
            edges: vec![edge.id.clone()],
        };
        let dot = graph.to_dot(Some(&path));

        assert!(dot.contains("fillcolor=lightblue"));
        assert!(dot.contains("color=blue"));
    }
}
