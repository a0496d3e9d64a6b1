//! Appearance and co-occurrence aggregation.
//!
//! [`Aggregates::from_table`] walks every episode once. Each character in an
//! episode's cast gains one appearance, and every unordered pair of distinct
//! characters in that cast gains one co-occurrence. Since a cast is a set,
//! duplicate credits never inflate either count.

use crate::credits::CreditTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// CharacterPair
// ============================================================================

/// An unordered pair of distinct characters.
///
/// The names are stored in ascending order, so `(a, b)` and `(b, a)` are the
/// same pair.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterPair {
    first: String,
    second: String,
}

impl CharacterPair {
    /// Creates the canonical pair for two names.
    ///
    /// Returns `None` when both names are equal: a character never pairs
    /// with itself.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Option<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lexically smaller name.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexically larger name.
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Returns true if the character is one side of the pair.
    pub fn contains(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }

    /// Returns the other side of the pair, if `name` is one side.
    pub fn partner_of(&self, name: &str) -> Option<&str> {
        if self.first == name {
            Some(&self.second)
        } else if self.second == name {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for CharacterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

// ============================================================================
// Result rows
// ============================================================================

/// A character with its appearance count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCount {
    /// Character name.
    pub character: String,
    /// Number of distinct episodes the character is credited in.
    pub appearances: usize,
}

/// A pair of characters with the number of episodes they share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCount {
    /// First character (lexically smaller).
    pub character_a: String,
    /// Second character (lexically larger).
    pub character_b: String,
    /// Number of episodes crediting both.
    pub count: usize,
}

/// A partner of some character with the number of shared episodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerCount {
    /// Partner name.
    pub partner: String,
    /// Number of shared episodes.
    pub count: usize,
}

// ============================================================================
// Aggregates
// ============================================================================

/// Appearance and co-occurrence counts derived from a [`CreditTable`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregates {
    appearances: BTreeMap<String, usize>,
    pairs: BTreeMap<CharacterPair, usize>,
}

impl Aggregates {
    /// Aggregates a credit table.
    pub fn from_table(table: &CreditTable) -> Self {
        let mut appearances: BTreeMap<String, usize> = BTreeMap::new();
        let mut pairs: BTreeMap<CharacterPair, usize> = BTreeMap::new();

        for (_, cast) in table.casts() {
            // Casts are sorted sets, so (cast[i], cast[j]) with i < j is
            // already the canonical pair order.
            let cast: Vec<&String> = cast.iter().collect();
            for (i, a) in cast.iter().enumerate() {
                *appearances.entry((*a).clone()).or_default() += 1;
                for b in &cast[i + 1..] {
                    let pair = CharacterPair {
                        first: (*a).clone(),
                        second: (*b).clone(),
                    };
                    *pairs.entry(pair).or_default() += 1;
                }
            }
        }

        log::debug!(
            "Aggregated {} characters and {} pairs",
            appearances.len(),
            pairs.len()
        );

        Self { appearances, pairs }
    }

    /// Number of distinct episodes crediting the character (0 if unknown).
    pub fn appearance_count(&self, character: &str) -> usize {
        self.appearances.get(character).copied().unwrap_or(0)
    }

    /// Number of episodes crediting both characters.
    ///
    /// Symmetric in its arguments. Returns 0 for disjoint characters and
    /// for a character paired with itself, since self-pairs are never
    /// counted.
    pub fn co_occurrence(&self, character_a: &str, character_b: &str) -> usize {
        CharacterPair::new(character_a, character_b)
            .and_then(|pair| self.pairs.get(&pair).copied())
            .unwrap_or(0)
    }

    /// All appearance counts, keyed by character name.
    pub fn appearances(&self) -> &BTreeMap<String, usize> {
        &self.appearances
    }

    /// All co-occurrence counts, keyed by pair.
    pub fn pairs(&self) -> &BTreeMap<CharacterPair, usize> {
        &self.pairs
    }

    /// Number of distinct characters.
    pub fn character_count(&self) -> usize {
        self.appearances.len()
    }

    /// Returns true if nothing was aggregated.
    pub fn is_empty(&self) -> bool {
        self.appearances.is_empty()
    }

    /// The `n` most credited characters, ties broken by name.
    pub fn top_characters(&self, n: usize) -> Vec<CharacterCount> {
        let mut rows: Vec<CharacterCount> = self
            .appearances
            .iter()
            .map(|(character, &appearances)| CharacterCount {
                character: character.clone(),
                appearances,
            })
            .collect();
        // BTreeMap iteration is name-ordered and the sort is stable.
        rows.sort_by(|a, b| b.appearances.cmp(&a.appearances));
        rows.truncate(n);
        rows
    }

    /// The `n` most frequent pairs, ties broken by pair order.
    pub fn top_pairs(&self, n: usize) -> Vec<PairCount> {
        let mut rows: Vec<PairCount> = self
            .pairs
            .iter()
            .map(|(pair, &count)| PairCount {
                character_a: pair.first.clone(),
                character_b: pair.second.clone(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(n);
        rows
    }

    /// Every partner of a character, most shared episodes first.
    pub fn pairs_for(&self, character: &str) -> Vec<PartnerCount> {
        let mut rows: Vec<PartnerCount> = self
            .pairs
            .iter()
            .filter_map(|(pair, &count)| {
                pair.partner_of(character).map(|partner| PartnerCount {
                    partner: partner.to_string(),
                    count,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.partner.cmp(&b.partner)));
        rows
    }
}

// ============================================================================
// Tests
// ============================================================================
