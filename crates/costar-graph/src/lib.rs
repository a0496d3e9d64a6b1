//! Character co-occurrence graph for Costar.
//!
//! Turns [`costar_core::Aggregates`] into a petgraph-backed [`CastGraph`]
//! and provides rankings and views over it.
//!
//! # Modules
//!
//! - [`types`]: [`CastGraph`], [`CharacterNode`], [`Pairing`]
//! - [`builder`]: [`CastGraphBuilder`] and build statistics
//! - [`algorithms`]: connectedness, neighbors, matrix, clusters

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod algorithms;
pub mod builder;
mod proptests;
pub mod types;

pub use algorithms::{
    CoOccurrenceMatrix, Connectedness, clusters, co_occurrence_matrix, connectedness, neighbors,
};
pub use builder::{BuildStats, CastGraphBuilder};
pub use types::{CastGraph, CharacterNode, Pairing};
