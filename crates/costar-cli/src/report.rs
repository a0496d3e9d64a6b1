//! Result types for each command and their text renderings.

use crate::output::{Align, Render, table};
use costar_core::{
    CharacterArc, CharacterCount, DatasetFormat, PairCount, PartnerCount, PlotLeaders,
};
use costar_graph::{CoOccurrenceMatrix, Connectedness};
use serde::Serialize;

/// Points per line in a rendered character arc.
const ARC_LINE_WIDTH: usize = 20;

fn characters_table(rows: &[CharacterCount]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.character.clone(), r.appearances.to_string()])
        .collect();
    table(&[("Character", Align::Left), ("Episodes", Align::Right)], &rows)
}

fn pairs_table(rows: &[PairCount]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.character_a.clone(),
                r.character_b.clone(),
                r.count.to_string(),
            ]
        })
        .collect();
    table(
        &[
            ("Character A", Align::Left),
            ("Character B", Align::Left),
            ("Shared", Align::Right),
        ],
        &rows,
    )
}

// ============================================================================
// summary
// ============================================================================

/// Shape of the loaded dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// Path the credits were read from.
    pub source: String,
    /// Layout used to read the file.
    pub layout: DatasetFormat,
    /// Episodes, including ones nobody is credited in.
    pub episodes: usize,
    /// Distinct characters.
    pub characters: usize,
    /// Distinct credits.
    pub credits: usize,
    /// Distinct co-occurring pairs.
    pub pairs: usize,
    /// Plot groups.
    pub plot_groups: usize,
    /// Malformed rows that were skipped.
    pub skipped_rows: usize,
    /// Duplicate credits that were collapsed.
    pub duplicates: usize,
}

/// Output of `costar summary`.
#[derive(Clone, Debug, Serialize)]
pub struct SummaryReport {
    /// Dataset shape.
    pub dataset: DatasetStats,
    /// Most credited characters.
    pub top_characters: Vec<CharacterCount>,
    /// Most frequent pairs.
    pub top_pairs: Vec<PairCount>,
}

impl Render for SummaryReport {
    fn render_text(&self) -> String {
        let d = &self.dataset;
        let mut text = format!("Dataset: {} ({} layout)\n", d.source, d.layout);
        text.push_str(&format!(
            "  {} episodes, {} characters, {} credits, {} pairs, {} plot groups\n",
            d.episodes, d.characters, d.credits, d.pairs, d.plot_groups
        ));
        if d.skipped_rows > 0 || d.duplicates > 0 {
            text.push_str(&format!(
                "  {} rows skipped, {} duplicate credits collapsed\n",
                d.skipped_rows, d.duplicates
            ));
        }
        text.push_str(&format!(
            "\nTop {} characters by appearances:\n",
            self.top_characters.len()
        ));
        text.push_str(&characters_table(&self.top_characters));
        text.push_str(&format!(
            "\nTop {} character pairs by co-occurrence:\n",
            self.top_pairs.len()
        ));
        text.push_str(&pairs_table(&self.top_pairs));
        text
    }
}

// ============================================================================
// appearances / pairs / pair
// ============================================================================

/// Output of `costar appearances`.
#[derive(Clone, Debug, Serialize)]
pub struct AppearancesReport {
    /// Characters by appearances.
    pub characters: Vec<CharacterCount>,
}

impl Render for AppearancesReport {
    fn render_text(&self) -> String {
        characters_table(&self.characters)
    }
}

/// Output of `costar pairs`.
#[derive(Clone, Debug, Serialize)]
pub struct PairsReport {
    /// Pairs by shared episodes.
    pub pairs: Vec<PairCount>,
}

impl Render for PairsReport {
    fn render_text(&self) -> String {
        pairs_table(&self.pairs)
    }
}

/// Output of `costar pairs --character NAME`.
#[derive(Clone, Debug, Serialize)]
pub struct PartnersReport {
    /// The character whose partners are listed.
    pub character: String,
    /// Episodes the character is credited in.
    pub appearances: usize,
    /// Distinct partners, before any `--top` limit.
    pub total_partners: usize,
    /// Partners by shared episodes.
    pub partners: Vec<PartnerCount>,
}

impl Render for PartnersReport {
    fn render_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .partners
            .iter()
            .map(|p| vec![p.partner.clone(), p.count.to_string()])
            .collect();
        format!(
            "{} ({} episodes) shares episodes with {} characters:\n{}",
            self.character,
            self.appearances,
            self.total_partners,
            table(&[("Partner", Align::Left), ("Shared", Align::Right)], &rows)
        )
    }
}

/// Output of `costar pair A B`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PairReport {
    /// First character as given.
    pub character_a: String,
    /// Second character as given.
    pub character_b: String,
    /// Episodes crediting the first character.
    pub appearances_a: usize,
    /// Episodes crediting the second character.
    pub appearances_b: usize,
    /// Episodes crediting both.
    pub shared: usize,
}

impl Render for PairReport {
    fn render_text(&self) -> String {
        format!(
            "{} ({} episodes) and {} ({} episodes) share {} episodes\n",
            self.character_a, self.appearances_a, self.character_b, self.appearances_b, self.shared
        )
    }
}

// ============================================================================
// arc
// ============================================================================

impl Render for CharacterArc {
    fn render_text(&self) -> String {
        let mut text = format!(
            "{}: {} of {} episodes",
            self.character,
            self.appearances,
            self.points.len()
        );
        if let (Some(first), Some(last)) = (self.first_appearance(), self.last_appearance()) {
            text.push_str(&format!(" (first {first}, last {last})"));
        }
        text.push('\n');

        let label_width = self
            .points
            .chunks(ARC_LINE_WIDTH)
            .map(|chunk| chunk[0].episode.as_str().chars().count())
            .max()
            .unwrap_or(0);
        for chunk in self.points.chunks(ARC_LINE_WIDTH) {
            let marks: String = chunk
                .iter()
                .map(|p| if p.present { '#' } else { '.' })
                .collect();
            text.push_str(&format!(
                "  {:>label_width$}  {marks}\n",
                chunk[0].episode.as_str()
            ));
        }
        text
    }
}

// ============================================================================
// plots
// ============================================================================

/// Output of `costar plots`.
#[derive(Clone, Debug, Serialize)]
pub struct PlotsReport {
    /// One entry per plot group.
    pub plots: Vec<PlotLeaders>,
}

impl Render for PlotsReport {
    fn render_text(&self) -> String {
        if self.plots.is_empty() {
            return "No plot groups in this dataset.\n".to_string();
        }
        self.plots
            .iter()
            .map(|group| {
                let names: Vec<String> = group
                    .leaders
                    .iter()
                    .map(|c| format!("{} ({})", c.character, c.appearances))
                    .collect();
                format!(
                    "Plot {} [{} episodes]: {}\n",
                    group.plot,
                    group.episodes,
                    names.join(", ")
                )
            })
            .collect()
    }
}

// ============================================================================
// connections / matrix / clusters
// ============================================================================

/// Output of `costar connections`.
#[derive(Clone, Debug, Serialize)]
pub struct ConnectionsReport {
    /// Characters by total co-occurrence.
    pub characters: Vec<Connectedness>,
}

impl Render for ConnectionsReport {
    fn render_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .characters
            .iter()
            .map(|c| {
                vec![
                    c.character.clone(),
                    c.total.to_string(),
                    c.partners.to_string(),
                ]
            })
            .collect();
        table(
            &[
                ("Character", Align::Left),
                ("Co-occurrences", Align::Right),
                ("Partners", Align::Right),
            ],
            &rows,
        )
    }
}

impl Render for CoOccurrenceMatrix {
    /// Lower triangle only: the matrix is symmetric with a zero diagonal.
    fn render_text(&self) -> String {
        let n = self.size();
        if n == 0 {
            return "No characters to show.\n".to_string();
        }

        let labels: Vec<String> = self
            .characters
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {name}", i + 1))
            .collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let cell_width = self
            .max_count()
            .to_string()
            .len()
            .max(n.to_string().len());

        let mut header = " ".repeat(label_width);
        for j in 1..n {
            header.push_str(&format!("  {j:>cell_width$}"));
        }
        let mut text = format!("{}\n", header.trim_end());

        for (i, label) in labels.iter().enumerate() {
            let mut line = format!("{label:<label_width$}");
            for j in 0..i {
                line.push_str(&format!("  {:>cell_width$}", self.counts[i][j]));
            }
            text.push_str(line.trim_end());
            text.push('\n');
        }
        text
    }
}

/// Output of `costar clusters`.
#[derive(Clone, Debug, Serialize)]
pub struct ClustersReport {
    /// Minimum shared episodes for a link.
    pub min_count: usize,
    /// Groups of linked characters, largest first.
    pub clusters: Vec<Vec<String>>,
}

impl Render for ClustersReport {
    fn render_text(&self) -> String {
        let mut text = format!(
            "{} clusters (pairs sharing at least {} episodes):\n",
            self.clusters.len(),
            self.min_count
        );
        for (i, members) in self.clusters.iter().enumerate() {
            text.push_str(&format!(
                "  {}. [{}] {}\n",
                i + 1,
                members.len(),
                members.join(", ")
            ));
        }
        text
    }
}
