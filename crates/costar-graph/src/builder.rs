//! CastGraphBuilder for constructing co-occurrence graphs.
//!
//! Building is two-phase:
//!
//! 1. Add one node per character, carrying its appearance count.
//! 2. Add one edge per pair whose co-occurrence reaches the minimum count.
//!
//! All nodes exist before any edge is added, so pair order never matters.

use crate::{CastGraph, CharacterNode};
use costar_core::{Aggregates, Result};

/// Statistics from a graph build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of character nodes created.
    pub nodes_created: usize,
    /// Number of pairing edges created.
    pub edges_created: usize,
    /// Pairs dropped for falling below the minimum count.
    pub pairs_below_threshold: usize,
}

/// Builder for [`CastGraph`].
#[derive(Debug, Clone)]
pub struct CastGraphBuilder {
    min_count: usize,
}

impl Default for CastGraphBuilder {
    fn default() -> Self {
        Self { min_count: 1 }
    }
}

impl CastGraphBuilder {
    /// Creates a builder that keeps every pair sharing at least one episode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep pairs sharing at least `min_count` episodes.
    ///
    /// Values below 1 are raised to 1.
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count.max(1);
        self
    }

    /// Builds the graph from aggregated counts.
    pub fn build(&self, aggregates: &Aggregates) -> Result<(CastGraph, BuildStats)> {
        let mut graph = CastGraph::new();
        let mut stats = BuildStats::default();

        // ================================================================
        // Phase 1: characters
        // ================================================================
        for (name, &appearances) in aggregates.appearances() {
            graph.add_character(CharacterNode::new(name.as_str(), appearances));
            stats.nodes_created += 1;
        }

        // ================================================================
        // Phase 2: pairings
        // ================================================================
        for (pair, &count) in aggregates.pairs() {
            if count < self.min_count {
                stats.pairs_below_threshold += 1;
                continue;
            }
            graph.add_pairing(pair.first(), pair.second(), count)?;
            stats.edges_created += 1;
        }

        log::debug!(
            "Built cast graph: {} characters, {} pairings ({} below threshold)",
            stats.nodes_created,
            stats.edges_created,
            stats.pairs_below_threshold
        );

        Ok((graph, stats))
    }
}

impl CastGraph {
    /// Builds a graph keeping every co-occurring pair.
    pub fn from_aggregates(aggregates: &Aggregates) -> Result<Self> {
        CastGraphBuilder::new()
            .build(aggregates)
            .map(|(graph, _)| graph)
    }
}
