//! Costar Core: credit tables, CSV loading and aggregation.
//!
//! This crate holds everything needed to turn an episode credits file into
//! appearance and co-occurrence counts. It has no internal Costar
//! dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`credits`]: Episode ids, plot ids, and the [`CreditTable`]
//! - [`loader`]: CSV loading in long and wide layouts
//! - [`aggregate`]: Appearance and co-occurrence counts
//! - [`analysis`]: Character arcs and plot-group leaders
//! - [`traits`]: The [`ConfigManager`] trait
//! - [`util`]: Path helpers
//!
//! # Example
//!
//! ```
//! use costar_core::{Aggregates, LoadOptions, load_credits_from_reader};
//!
//! let csv = "episode,character\nE1,A\nE1,B\nE2,A\nE2,C\nE3,A\nE3,B\nE3,C\n";
//! let (table, _report) = load_credits_from_reader(csv.as_bytes(), &LoadOptions::default())?;
//! let agg = Aggregates::from_table(&table);
//!
//! assert_eq!(agg.appearance_count("A"), 3);
//! assert_eq!(agg.co_occurrence("B", "A"), 2);
//! # Ok::<(), costar_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod analysis;
pub mod credits;
pub mod error;
pub mod loader;
mod proptests;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use aggregate::{Aggregates, CharacterCount, CharacterPair, PairCount, PartnerCount};
pub use analysis::{ArcPoint, CharacterArc, PlotLeaders, character_arc, plot_leaders};
pub use credits::{Credit, CreditTable, EpisodeId, PlotId};
pub use error::{Error, Result};
pub use loader::{
    DatasetFormat, LoadOptions, LoadReport, SkippedRow, load_credits, load_credits_from_reader,
};
pub use traits::ConfigManager;
