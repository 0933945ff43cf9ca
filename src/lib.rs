// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Routeyard library - Switching yard for small weighted route graphs
//!
//! This crate provides a persistent node/edge route graph, a single-source
//! shortest-path engine with path reconstruction, and export to Graphviz
//! DOT and JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod engine;
pub mod graph;

/// Core data types for the route graph document
pub mod types {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use sha2::{Digest, Sha256};

    // =========================================================================
    // Position
    // =========================================================================

    /// Position in 2D space. Layout metadata for renderers and export; the
    /// path engine never reads it.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Position {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
    }

    impl Position {
        /// Euclidean distance to another position
        #[must_use]
        pub fn distance_to(&self, other: &Position) -> f64 {
            ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
        }
    }

    // =========================================================================
    // Node
    // =========================================================================

    /// Node in the route graph. Immutable once added to the store.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Node {
        /// Always "Node"
        pub kind: String,
        /// Unique identifier: node:<hash of label>
        pub id: String,
        /// Display label
        pub label: String,
        /// 2D position for layout/export
        pub position: Position,
    }

    impl Node {
        /// Generate a deterministic ID for a node from its label
        #[must_use]
        pub fn generate_id(label: &str) -> String {
            let mut hasher = Sha256::new();
            hasher.update(label.as_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("node:{}", &hash[..12])
        }

        /// Build a node with a generated ID
        #[must_use]
        pub fn new(label: &str, position: Position) -> Self {
            Self {
                kind: "Node".into(),
                id: Self::generate_id(label),
                label: label.into(),
                position,
            }
        }
    }

    // =========================================================================
    // Edge
    // =========================================================================

    /// Directed weighted edge, traversable only from `from` to `to`.
    /// Immutable once added to the store.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Edge {
        /// Always "Edge"
        pub kind: String,
        /// Content-hash ID: edge:<hash of (from, to)>
        pub id: String,
        /// Source node ID
        pub from: String,
        /// Target node ID
        pub to: String,
        /// Non-negative traversal cost
        pub weight: f64,
    }

    impl Edge {
        /// Generate a deterministic ID for an edge
        #[must_use]
        pub fn generate_id(from: &str, to: &str) -> String {
            let mut hasher = Sha256::new();
            hasher.update(from.as_bytes());
            hasher.update(to.as_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("edge:{}", &hash[..8])
        }

        /// Build an edge with a generated ID
        #[must_use]
        pub fn new(from: &str, to: &str, weight: f64) -> Self {
            Self {
                kind: "Edge".into(),
                id: Self::generate_id(from, to),
                from: from.into(),
                to: to.into(),
                weight,
            }
        }
    }

    // =========================================================================
    // Graph Store
    // =========================================================================

    /// Provenance metadata for a graph document
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct StoreMeta {
        /// What produced this document (seed, import, manual)
        pub generated_by: String,
        /// When the document was produced
        pub generated_at: DateTime<Utc>,
    }

    /// The complete graph store persisted as graph.json
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct GraphStore {
        /// Provenance metadata
        #[serde(default)]
        pub meta: Option<StoreMeta>,
        /// All nodes
        #[serde(default)]
        pub nodes: Vec<Node>,
        /// All edges
        #[serde(default)]
        pub edges: Vec<Edge>,
    }

    // =========================================================================
    // Route Path
    // =========================================================================

    /// Result of a shortest-path query.
    ///
    /// `nodes` and `edges` are ordered target→source, the order the
    /// predecessor walk produces them. Callers that want source→target
    /// order reverse the sequences. Renderers treat both lists purely as
    /// a highlight set.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RoutePath {
        /// Source node ID
        pub from: String,
        /// Target node ID
        pub to: String,
        /// Node IDs along the path, target first
        pub nodes: Vec<String>,
        /// Traversed edge IDs, target side first
        pub edges: Vec<String>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::engine::{EngineError, ShortestPathEngine};
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
