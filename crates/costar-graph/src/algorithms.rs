//! Graph algorithms for co-occurrence analysis.
//!
//! Provides:
//! - Connectedness ranking (total shared episodes per character)
//! - Neighbor listing for one character
//! - Co-occurrence matrix over the most connected characters
//! - Cluster detection (connected components)

use crate::CastGraph;
use costar_core::{Error, PartnerCount, Result};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

// ============================================================================
// Result types
// ============================================================================

/// Connectedness of one character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectedness {
    /// Character name.
    pub character: String,
    /// Sum of shared episodes over all partners.
    pub total: usize,
    /// Number of distinct partners.
    pub partners: usize,
}

/// Symmetric co-occurrence matrix.
///
/// Rows and columns share the same character order (sorted by name); the
/// diagonal is always zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoOccurrenceMatrix {
    /// Row and column labels.
    pub characters: Vec<String>,
    /// `counts[i][j]` is the co-occurrence of `characters[i]` and `characters[j]`.
    pub counts: Vec<Vec<usize>>,
}

impl CoOccurrenceMatrix {
    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.characters.len()
    }

    /// Looks up a cell by character names.
    pub fn get(&self, a: &str, b: &str) -> Option<usize> {
        let i = self.characters.iter().position(|c| c == a)?;
        let j = self.characters.iter().position(|c| c == b)?;
        Some(self.counts[i][j])
    }

    /// Largest cell value, used for scaling renderings.
    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// Algorithms
// ============================================================================

fn total_weight(graph: &CastGraph, idx: NodeIndex) -> (usize, usize) {
    graph
        .graph
        .edges(idx)
        .fold((0, 0), |(total, partners), edge| {
            (total + edge.weight().count, partners + 1)
        })
}

/// Rank characters by total co-occurrence.
///
/// Returns at most `limit` entries, most connected first, ties by name.
/// Characters without any partner are included with a total of zero.
pub fn connectedness(graph: &CastGraph, limit: usize) -> Vec<Connectedness> {
    let mut scores: Vec<Connectedness> = graph
        .graph
        .node_indices()
        .map(|idx| {
            let (total, partners) = total_weight(graph, idx);
            Connectedness {
                character: graph.graph[idx].name.clone(),
                total,
                partners,
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.character.cmp(&b.character))
    });
    scores.truncate(limit);
    scores
}

/// List the partners of a character, most shared episodes first.
pub fn neighbors(graph: &CastGraph, character: &str) -> Result<Vec<PartnerCount>> {
    let idx = graph
        .get_index(character)
        .ok_or_else(|| Error::not_found("character", character))?;

    let mut partners: Vec<PartnerCount> = graph
        .graph
        .edges(idx)
        .map(|edge| {
            let other = if edge.source() == idx {
                edge.target()
            } else {
                edge.source()
            };
            PartnerCount {
                partner: graph.graph[other].name.clone(),
                count: edge.weight().count,
            }
        })
        .collect();

    partners.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.partner.cmp(&b.partner)));
    Ok(partners)
}

/// Build the co-occurrence matrix of the `size` most connected characters.
///
/// Characters without any partner are left out, so the matrix may be
/// smaller than `size`.
pub fn co_occurrence_matrix(graph: &CastGraph, size: usize) -> CoOccurrenceMatrix {
    let mut characters: Vec<String> = connectedness(graph, usize::MAX)
        .into_iter()
        .filter(|c| c.total > 0)
        .take(size)
        .map(|c| c.character)
        .collect();
    characters.sort();

    let counts = characters
        .iter()
        .map(|a| {
            characters
                .iter()
                .map(|b| graph.weight_between(a, b))
                .collect()
        })
        .collect();

    CoOccurrenceMatrix { characters, counts }
}

/// Find groups of characters connected through shared episodes.
///
/// Each cluster is sorted by name. Clusters are ordered largest first,
/// ties by their first name.
pub fn clusters(graph: &CastGraph) -> Vec<Vec<String>> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut result: Vec<Vec<String>> = Vec::new();

    for start in graph.graph.node_indices() {
        if !visited.insert(start) {
            continue;
        }

        let mut members = Vec::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            members.push(graph.graph[current].name.clone());
            for neighbor in graph.graph.neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        members.sort();
        result.push(members);
    }

    result.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
    result
}
