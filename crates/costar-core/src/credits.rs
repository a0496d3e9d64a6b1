//! The in-memory credits table.
//!
//! A [`CreditTable`] groups credits by episode. Each episode holds the set of
//! characters credited in it, so a (episode, character) pair can only ever
//! be stored once. Episodes may optionally carry a [`PlotId`] naming the
//! story arc they belong to.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Compare two labels, numerically when both are integers.
///
/// Integers sort before non-numeric labels; numerically equal labels
/// (`"01"` and `"1"`) fall back to string order so the ordering stays
/// consistent with equality.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Identifier of an episode.
///
/// Episode ids are free-form strings. They order numerically when both
/// sides are integers (`2 < 10`), and integers sort before other labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(String);

impl EpisodeId {
    /// Creates an episode id, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for EpisodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for EpisodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EpisodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Label of a plot group (story arc).
///
/// Integral float labels are normalized, so `"3.0"` and `"3"` name the
/// same group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotId(String);

impl PlotId {
    /// Creates a plot id from a raw cell value.
    pub fn new(label: impl AsRef<str>) -> Self {
        let label = label.as_ref().trim();
        match label.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
                Self(format!("{}", value as i64))
            }
            _ => Self(label.to_string()),
        }
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for PlotId {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for PlotId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Credit
// ============================================================================

/// A record asserting that a character appeared in an episode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credit {
    /// Episode the character is credited in.
    pub episode: EpisodeId,
    /// Character name, compared exactly (case-sensitive).
    pub character: String,
}

impl Credit {
    /// Creates a new credit.
    pub fn new(episode: impl Into<EpisodeId>, character: impl Into<String>) -> Self {
        Self {
            episode: episode.into(),
            character: character.into(),
        }
    }
}

// ============================================================================
// CreditTable
// ============================================================================

/// All credits of a dataset, grouped by episode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreditTable {
    episodes: BTreeMap<EpisodeId, BTreeSet<String>>,
    plots: BTreeMap<EpisodeId, PlotId>,
}

impl CreditTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from credits, collapsing duplicates.
    pub fn from_credits<I>(credits: I) -> Self
    where
        I: IntoIterator<Item = Credit>,
    {
        let mut table = Self::new();
        for credit in credits {
            table.insert(credit.episode, credit.character);
        }
        table
    }

    /// Registers an episode even if nobody is credited in it.
    pub fn add_episode(&mut self, episode: EpisodeId) {
        self.episodes.entry(episode).or_default();
    }

    /// Records a credit.
    ///
    /// Returns `false` if the credit was already present.
    pub fn insert(&mut self, episode: EpisodeId, character: impl Into<String>) -> bool {
        self.episodes
            .entry(episode)
            .or_default()
            .insert(character.into())
    }

    /// Assigns an episode to a plot group.
    ///
    /// Returns the previously assigned group if there was one; the
    /// existing assignment is kept in that case.
    pub fn set_plot(&mut self, episode: EpisodeId, plot: PlotId) -> Option<PlotId> {
        if let Some(existing) = self.plots.get(&episode) {
            return Some(existing.clone());
        }
        self.episodes.entry(episode.clone()).or_default();
        self.plots.insert(episode, plot);
        None
    }

    /// Returns the plot group of an episode.
    pub fn plot_of(&self, episode: &EpisodeId) -> Option<&PlotId> {
        self.plots.get(episode)
    }

    /// Returns true if any episode carries a plot group.
    pub fn has_plots(&self) -> bool {
        !self.plots.is_empty()
    }

    /// Iterates episodes in order.
    pub fn episodes(&self) -> impl Iterator<Item = &EpisodeId> {
        self.episodes.keys()
    }

    /// Iterates each episode with its cast, in episode order.
    pub fn casts(&self) -> impl Iterator<Item = (&EpisodeId, &BTreeSet<String>)> {
        self.episodes.iter()
    }

    /// Returns the cast of one episode.
    pub fn cast_of(&self, episode: &EpisodeId) -> Option<&BTreeSet<String>> {
        self.episodes.get(episode)
    }

    /// Iterates every credit as `(episode, character)`.
    pub fn iter_credits(&self) -> impl Iterator<Item = (&EpisodeId, &str)> {
        self.episodes
            .iter()
            .flat_map(|(ep, cast)| cast.iter().map(move |c| (ep, c.as_str())))
    }

    /// Returns the distinct character names, sorted.
    pub fn characters(&self) -> BTreeSet<&str> {
        self.episodes
            .values()
            .flat_map(|cast| cast.iter().map(String::as_str))
            .collect()
    }

    /// Returns true if the character is credited anywhere.
    pub fn contains_character(&self, name: &str) -> bool {
        self.episodes.values().any(|cast| cast.contains(name))
    }

    /// Number of episodes, including ones with an empty cast.
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Number of distinct credits.
    pub fn credit_count(&self) -> usize {
        self.episodes.values().map(BTreeSet::len).sum()
    }

    /// Returns true if the table holds no credits.
    pub fn is_empty(&self) -> bool {
        self.credit_count() == 0
    }
}

impl FromIterator<Credit> for CreditTable {
    fn from_iter<I: IntoIterator<Item = Credit>>(iter: I) -> Self {
        Self::from_credits(iter)
    }
}

// ============================================================================
// Tests
// ============================================================================
