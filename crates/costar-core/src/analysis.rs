//! Per-character and per-plot views over a credit table.

use crate::aggregate::CharacterCount;
use crate::credits::{CreditTable, EpisodeId, PlotId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Character arc
// ============================================================================

/// Presence of a character in one episode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcPoint {
    /// Episode id.
    pub episode: EpisodeId,
    /// Whether the character is credited in this episode.
    pub present: bool,
    /// Plot group of the episode, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<PlotId>,
}

/// A character's presence across every episode, in episode order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterArc {
    /// Character name.
    pub character: String,
    /// Number of episodes the character is credited in.
    pub appearances: usize,
    /// One point per episode of the table.
    pub points: Vec<ArcPoint>,
}

impl CharacterArc {
    /// First episode the character appears in.
    pub fn first_appearance(&self) -> Option<&EpisodeId> {
        self.points.iter().find(|p| p.present).map(|p| &p.episode)
    }

    /// Last episode the character appears in.
    pub fn last_appearance(&self) -> Option<&EpisodeId> {
        self.points.iter().rev().find(|p| p.present).map(|p| &p.episode)
    }
}

/// Builds the appearance arc of one character.
///
/// Fails with [`Error::NotFound`] if the character is never credited.
pub fn character_arc(table: &CreditTable, character: &str) -> Result<CharacterArc> {
    if !table.contains_character(character) {
        return Err(Error::not_found("character", character));
    }

    let points: Vec<ArcPoint> = table
        .casts()
        .map(|(episode, cast)| ArcPoint {
            episode: episode.clone(),
            present: cast.contains(character),
            plot: table.plot_of(episode).cloned(),
        })
        .collect();
    let appearances = points.iter().filter(|p| p.present).count();

    Ok(CharacterArc {
        character: character.to_string(),
        appearances,
        points,
    })
}

// ============================================================================
// Plot leaders
// ============================================================================

/// The most credited characters within one plot group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotLeaders {
    /// Plot group.
    pub plot: PlotId,
    /// Number of episodes in the group.
    pub episodes: usize,
    /// Top characters by appearances within the group, ties by name.
    pub leaders: Vec<CharacterCount>,
}

/// Ranks characters within each plot group.
///
/// Episodes without a plot group are ignored. Groups are returned in plot
/// order; each lists at most `per_plot` characters.
pub fn plot_leaders(table: &CreditTable, per_plot: usize) -> Vec<PlotLeaders> {
    let mut groups: BTreeMap<&PlotId, (usize, BTreeMap<&str, usize>)> = BTreeMap::new();

    for (episode, cast) in table.casts() {
        let Some(plot) = table.plot_of(episode) else {
            continue;
        };
        let (episodes, counts) = groups.entry(plot).or_default();
        *episodes += 1;
        for character in cast {
            *counts.entry(character.as_str()).or_default() += 1;
        }
    }

    groups
        .into_iter()
        .map(|(plot, (episodes, counts))| {
            let mut leaders: Vec<CharacterCount> = counts
                .into_iter()
                .map(|(character, appearances)| CharacterCount {
                    character: character.to_string(),
                    appearances,
                })
                .collect();
            leaders.sort_by(|a, b| b.appearances.cmp(&a.appearances));
            leaders.truncate(per_plot);
            PlotLeaders {
                plot: plot.clone(),
                episodes,
                leaders,
            }
        })
        .collect()
}
