//! Core graph types for character co-occurrence.
//!
//! A [`CastGraph`] is an undirected graph with one node per character and
//! one edge per pair of characters that share at least one episode. Edge
//! weights are the number of shared episodes.

use costar_core::{Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Node and edge weights
// ============================================================================

/// A character node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterNode {
    /// Character name (unique within the graph).
    pub name: String,
    /// Number of episodes the character is credited in.
    pub appearances: usize,
}

impl CharacterNode {
    /// Creates a new node.
    pub fn new(name: impl Into<String>, appearances: usize) -> Self {
        Self {
            name: name.into(),
            appearances,
        }
    }
}

/// Edge weight: how many episodes two characters share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Number of shared episodes.
    pub count: usize,
}

// ============================================================================
// CastGraph
// ============================================================================

/// Undirected co-occurrence graph.
///
/// Wraps a petgraph `UnGraph` with a name → index lookup table.
#[derive(Clone, Debug, Default)]
pub struct CastGraph {
    /// The underlying undirected graph.
    pub graph: UnGraph<CharacterNode, Pairing>,
    /// Lookup table: character name → petgraph NodeIndex.
    pub node_indices: HashMap<String, NodeIndex>,
}

impl CastGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of characters.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of pairings.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Gets a character node by name.
    pub fn get_node(&self, name: &str) -> Option<&CharacterNode> {
        self.get_index(name).map(|idx| &self.graph[idx])
    }

    /// Gets the petgraph NodeIndex for a character.
    pub fn get_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_indices.get(name).copied()
    }

    /// Checks if a character is in the graph.
    pub fn contains_character(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Returns an iterator over all character nodes.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &CharacterNode> {
        self.graph.node_weights()
    }

    /// Add a character.
    ///
    /// If the character already exists, returns its existing index.
    pub fn add_character(&mut self, node: CharacterNode) -> NodeIndex {
        if let Some(&existing) = self.node_indices.get(&node.name) {
            return existing;
        }
        let name = node.name.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(name, idx);
        idx
    }

    /// Connect two existing characters.
    ///
    /// Both characters must already exist; a self-pairing is rejected.
    pub fn add_pairing(&mut self, a: &str, b: &str, count: usize) -> Result<()> {
        let a_idx = self
            .get_index(a)
            .ok_or_else(|| Error::not_found("character", a))?;
        let b_idx = self
            .get_index(b)
            .ok_or_else(|| Error::not_found("character", b))?;
        if a_idx == b_idx {
            return Err(Error::parse(format!("cannot pair {a} with itself")));
        }
        self.graph.update_edge(a_idx, b_idx, Pairing { count });
        Ok(())
    }

    /// Number of episodes two characters share (0 if not connected).
    pub fn weight_between(&self, a: &str, b: &str) -> usize {
        match (self.get_index(a), self.get_index(b)) {
            (Some(x), Some(y)) => self
                .graph
                .find_edge(x, y)
                .map_or(0, |edge| self.graph[edge].count),
            _ => 0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
