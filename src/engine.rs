// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Single-source shortest-path engine with path reconstruction
//!
//! The engine takes a snapshot of the graph at construction time and never
//! mutates it. Analysis state (distance labels and predecessor
//! back-references) lives in an id-indexed table owned by the engine and is
//! fully reset on every `analyze` call.

use crate::types::{Edge, Node, RoutePath};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Precondition violations raised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `analyze` or a path query was invoked before any source was set
    #[error("no source node selected, call set_source first")]
    NoSourceSelected,
    /// A path query was invoked without a completed analysis for the
    /// current source
    #[error("no completed analysis for the current source, call analyze first")]
    AnalysisNotReady,
}

/// Per-node analysis state: best-known distance from the source and the
/// predecessor through which it was reached. Predecessors are id
/// back-references into the node table, never owning links, so the whole
/// table can be reset in place.
#[derive(Debug, Clone)]
struct AnalysisState {
    dist: f64,
    prev: Option<String>,
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self {
            dist: f64::INFINITY,
            prev: None,
        }
    }
}

/// Dijkstra-style label-setting engine over a static weighted digraph.
///
/// Lifecycle: `new` → `set_source` → `analyze` → any number of
/// `shortest_path_to` / `distance_to` queries. Setting a different source
/// invalidates the analysis; queries fail with
/// [`EngineError::AnalysisNotReady`] until `analyze` runs again.
///
/// Input integrity is assumed: edge endpoints must reference known nodes
/// and weights must be non-negative. Violations produce incorrect numeric
/// results, not errors.
pub struct ShortestPathEngine {
    nodes: HashMap<String, Node>,
    edges: HashMap<String, Edge>,
    /// Adjacency index: node id → ids of edges leaving that node, in
    /// input order. Relaxation and path reconstruction both scan this
    /// instead of the full edge table.
    outgoing: HashMap<String, Vec<String>>,
    state: HashMap<String, AnalysisState>,
    source: Option<String>,
    /// Source id the current analysis state is valid for
    analyzed_for: Option<String>,
}

impl ShortestPathEngine {
    /// Build an engine over a snapshot of the graph.
    ///
    /// Precomputes the outgoing adjacency index so relaxation never
    /// re-scans the full edge set.
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut outgoing: HashMap<String, Vec<String>> = HashMap::new();
        let mut state = HashMap::new();

        for node in &nodes {
            let edge_ids = edges
                .iter()
                .filter(|e| e.from == node.id)
                .map(|e| e.id.clone())
                .collect();
            outgoing.insert(node.id.clone(), edge_ids);
            state.insert(node.id.clone(), AnalysisState::default());
        }

        let nodes = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        let edges = edges.into_iter().map(|e| (e.id.clone(), e)).collect();

        Self {
            nodes,
            edges,
            outgoing,
            state,
            source: None,
            analyzed_for: None,
        }
    }

    /// Record the analysis origin for the next `analyze` call.
    ///
    /// Does not reset distances by itself. Any analysis computed for a
    /// previous source becomes stale and queries fail until `analyze`
    /// runs again.
    pub fn set_source(&mut self, node_id: &str) {
        self.source = Some(node_id.to_string());
    }

    /// Currently-set source node id, if any
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether a completed analysis exists for the current source
    #[must_use]
    pub fn is_analyzed(&self) -> bool {
        self.source.is_some() && self.analyzed_for == self.source
    }

    /// Run the label-setting analysis from the current source.
    ///
    /// Re-entrant: each call is a full fresh computation. Classical
    /// Dijkstra with an O(V²) minimum-selection scan, correct for
    /// non-negative weights only. Tie-break among equal minimum distances
    /// is unspecified; equal-cost routes may reconstruct differently
    /// between runs.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoSourceSelected`] if no source has been set.
    pub fn analyze(&mut self) -> Result<(), EngineError> {
        let source = self
            .source
            .clone()
            .ok_or(EngineError::NoSourceSelected)?;

        if self.analyzed_for.take().is_some() {
            for state in self.state.values_mut() {
                state.dist = f64::INFINITY;
                state.prev = None;
            }
        }

        if let Some(state) = self.state.get_mut(&source) {
            state.dist = 0.0;
        }

        let mut visited: HashSet<String> = HashSet::new();

        while visited.len() < self.state.len() {
            // Stops early once every unvisited node is unreachable.
            let Some(current) = self.find_min_unvisited(&visited) else {
                break;
            };
            visited.insert(current.clone());

            let current_dist = match self.state.get(&current) {
                Some(s) => s.dist,
                None => continue,
            };

            let Some(edge_ids) = self.outgoing.get(&current) else {
                continue;
            };
            for edge_id in edge_ids {
                let Some(edge) = self.edges.get(edge_id) else {
                    continue;
                };
                let candidate = current_dist + edge.weight;
                if let Some(neighbor) = self.state.get_mut(&edge.to) {
                    if candidate < neighbor.dist {
                        neighbor.dist = candidate;
                        neighbor.prev = Some(current.clone());
                    }
                }
            }
        }

        self.analyzed_for = Some(source);
        Ok(())
    }

    /// Reconstruct the shortest path to `target` from the recorded
    /// predecessors.
    ///
    /// The returned node and edge id sequences are ordered target→source.
    /// An unreachable target (and the reflexive query for the source
    /// itself) yields a path containing just the target node and no
    /// edges.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoSourceSelected`] if no source has been set,
    /// [`EngineError::AnalysisNotReady`] if no completed analysis exists
    /// for the current source.
    pub fn shortest_path_to(&self, target: &str) -> Result<RoutePath, EngineError> {
        let source = self.source.as_ref().ok_or(EngineError::NoSourceSelected)?;
        if self.analyzed_for.as_ref() != Some(source) {
            return Err(EngineError::AnalysisNotReady);
        }

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut current = target.to_string();

        loop {
            nodes.push(current.clone());

            let prev = match self.state.get(&current).and_then(|s| s.prev.clone()) {
                Some(p) => p,
                None => break,
            };

            // First edge from the predecessor into the current node wins;
            // parallel edges are not disambiguated by weight.
            let edge_id = self.outgoing.get(&prev).and_then(|ids| {
                ids.iter()
                    .find(|id| self.edges.get(*id).map_or(false, |e| e.to == current))
            });

            match edge_id {
                Some(id) => edges.push(id.clone()),
                None => break,
            }

            current = prev;
        }

        Ok(RoutePath {
            from: source.clone(),
            to: target.to_string(),
            nodes,
            edges,
        })
    }

    /// Recorded distance label for a node after analysis.
    ///
    /// Returns `f64::INFINITY` for unreachable or unknown node ids.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`Self::shortest_path_to`].
    pub fn distance_to(&self, node_id: &str) -> Result<f64, EngineError> {
        let source = self.source.as_ref().ok_or(EngineError::NoSourceSelected)?;
        if self.analyzed_for.as_ref() != Some(source) {
            return Err(EngineError::AnalysisNotReady);
        }

        Ok(self.state.get(node_id).map_or(f64::INFINITY, |s| s.dist))
    }

    /// Number of nodes in the snapshot
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// O(V) scan for the unvisited node with the smallest finite distance
    fn find_min_unvisited(&self, visited: &HashSet<String>) -> Option<String> {
        let mut min_dist = f64::INFINITY;
        let mut min_id: Option<&str> = None;

        for (id, state) in &self.state {
            if visited.contains(id) {
                continue;
            }
            if state.dist < min_dist {
                min_dist = state.dist;
                min_id = Some(id.as_str());
            }
        }

        min_id.map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Node, Position};

    fn make_node(label: &str) -> Node {
        Node::new(
            label,
            Position { x: 0.0, y: 0.0 },
        )
    }

    fn triangle() -> (Vec<Node>, Vec<Edge>) {
        let a = make_node("A");
        let b = make_node("B");
        let c = make_node("C");
        let edges = vec![
            Edge::new(&a.id, &b.id, 1.0),
            Edge::new(&b.id, &c.id, 2.0),
            Edge::new(&a.id, &c.id, 5.0),
        ];
        (vec![a, b, c], edges)
    }

    #[test]
    fn test_adjacency_is_outgoing_only() {
        let (nodes, edges) = triangle();
        let a = nodes[0].id.clone();
        let b = nodes[1].id.clone();
        let c = nodes[2].id.clone();
        let engine = ShortestPathEngine::new(nodes, edges);

        assert_eq!(engine.outgoing[&a].len(), 2);
        assert_eq!(engine.outgoing[&b].len(), 1);
        assert!(engine.outgoing[&c].is_empty());
    }

    #[test]
    fn test_relaxation_prefers_cheaper_route() {
        let (nodes, edges) = triangle();
        let a = nodes[0].id.clone();
        let c = nodes[2].id.clone();
        let mut engine = ShortestPathEngine::new(nodes, edges);

        engine.set_source(&a);
        engine.analyze().unwrap();

        // A→B→C at cost 3 beats the direct A→C edge at cost 5
        assert_eq!(engine.distance_to(&c).unwrap(), 3.0);
    }

    #[test]
    fn test_analyze_without_source_fails() {
        let (nodes, edges) = triangle();
        let mut engine = ShortestPathEngine::new(nodes, edges);

        assert_eq!(engine.analyze(), Err(EngineError::NoSourceSelected));
    }

    #[test]
    fn test_query_before_analyze_fails() {
        let (nodes, edges) = triangle();
        let a = nodes[0].id.clone();
        let mut engine = ShortestPathEngine::new(nodes, edges);

        engine.set_source(&a);
        assert_eq!(
            engine.shortest_path_to(&a).unwrap_err(),
            EngineError::AnalysisNotReady
        );
    }

    #[test]
    fn test_source_change_invalidates_analysis() {
        let (nodes, edges) = triangle();
        let a = nodes[0].id.clone();
        let b = nodes[1].id.clone();
        let mut engine = ShortestPathEngine::new(nodes, edges);

        engine.set_source(&a);
        engine.analyze().unwrap();
        assert!(engine.is_analyzed());

        engine.set_source(&b);
        assert!(!engine.is_analyzed());
        assert_eq!(
            engine.distance_to(&a).unwrap_err(),
            EngineError::AnalysisNotReady
        );
    }
}
