//! Command dispatch.
//!
//! Every analysis command loads the credits once into a [`Session`],
//! computes its result and hands it to [`emit`].

use crate::cli::{Cli, Command};
use crate::config::CostarConfig;
use crate::config_handlers::handle_config_command;
use crate::output::emit;
use crate::report::{
    AppearancesReport, ClustersReport, ConnectionsReport, DatasetStats, PairReport, PairsReport,
    PartnersReport, PlotsReport, SummaryReport,
};
use costar_core::{
    Aggregates, ConfigManager, CreditTable, Error, LoadReport, Result, character_arc,
    load_credits, plot_leaders,
};
use costar_graph::{CastGraph, CastGraphBuilder, clusters, co_occurrence_matrix, connectedness};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

/// A loaded dataset with its aggregates.
#[derive(Debug)]
pub struct Session {
    /// Where the credits came from.
    pub source: PathBuf,
    /// The credits.
    pub table: CreditTable,
    /// Load statistics.
    pub report: LoadReport,
    /// Appearance and pair counts.
    pub aggregates: Aggregates,
}

impl Session {
    /// Load the dataset named by the command line or config.
    pub fn load(cli: &Cli, config: &CostarConfig) -> Result<Self> {
        let source = config.dataset_path(cli.data.as_deref())?;
        let options = config.load_options(cli.layout)?;
        let (table, report) = load_credits(&source, &options)?;

        if !report.skipped.is_empty() {
            tracing::warn!(
                skipped = report.skipped.len(),
                "Some rows of {} could not be read",
                source.display()
            );
        }
        if report.coerced_cells > 0 {
            tracing::warn!(
                cells = report.coerced_cells,
                "Non-numeric cells were read as absent"
            );
        }

        let aggregates = Aggregates::from_table(&table);
        tracing::info!(
            episodes = table.episode_count(),
            characters = aggregates.character_count(),
            credits = table.credit_count(),
            "Loaded {}",
            source.display()
        );

        Ok(Self {
            source,
            table,
            report,
            aggregates,
        })
    }

    /// Build the co-occurrence graph, keeping pairs with at least
    /// `min_count` shared episodes.
    pub fn graph(&self, min_count: usize) -> Result<CastGraph> {
        let (graph, stats) = CastGraphBuilder::new()
            .with_min_count(min_count)
            .build(&self.aggregates)?;
        tracing::debug!(
            nodes = stats.nodes_created,
            edges = stats.edges_created,
            below_threshold = stats.pairs_below_threshold,
            "Built cast graph"
        );
        Ok(graph)
    }

    fn stats(&self) -> DatasetStats {
        let plot_groups: BTreeSet<_> = self
            .table
            .episodes()
            .filter_map(|episode| self.table.plot_of(episode))
            .collect();
        DatasetStats {
            source: self.source.display().to_string(),
            layout: self.report.format,
            episodes: self.table.episode_count(),
            characters: self.aggregates.character_count(),
            credits: self.table.credit_count(),
            pairs: self.aggregates.pairs().len(),
            plot_groups: plot_groups.len(),
            skipped_rows: self.report.skipped.len(),
            duplicates: self.report.duplicates,
        }
    }

    fn require_character(&self, name: &str) -> Result<()> {
        if self.table.contains_character(name) {
            Ok(())
        } else {
            Err(Error::not_found("character", name))
        }
    }
}

/// Run the parsed command, writing results to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    if let Command::Config { action } = &cli.command {
        return handle_config_command(cli.config.as_deref(), action, out);
    }

    let config = CostarConfig::load(cli.config.as_deref())?;
    let session = Session::load(cli, &config)?;
    let defaults = &config.report;
    let format = cli.output;

    match &cli.command {
        Command::Summary { top } => {
            let n = top.unwrap_or(defaults.top);
            let report = SummaryReport {
                dataset: session.stats(),
                top_characters: session.aggregates.top_characters(n),
                top_pairs: session.aggregates.top_pairs(n),
            };
            emit(out, format, &report)
        }
        Command::Appearances { top } => {
            let report = AppearancesReport {
                characters: session
                    .aggregates
                    .top_characters(top.unwrap_or(defaults.top)),
            };
            emit(out, format, &report)
        }
        Command::Pairs {
            top,
            character: Some(name),
        } => {
            session.require_character(name)?;
            let mut partners = session.aggregates.pairs_for(name);
            let total_partners = partners.len();
            if let Some(n) = top {
                partners.truncate(*n);
            }
            let report = PartnersReport {
                character: name.clone(),
                appearances: session.aggregates.appearance_count(name),
                total_partners,
                partners,
            };
            emit(out, format, &report)
        }
        Command::Pairs {
            top,
            character: None,
        } => {
            let report = PairsReport {
                pairs: session.aggregates.top_pairs(top.unwrap_or(defaults.top)),
            };
            emit(out, format, &report)
        }
        Command::Pair { a, b } => {
            session.require_character(a)?;
            session.require_character(b)?;
            let report = PairReport {
                character_a: a.clone(),
                character_b: b.clone(),
                appearances_a: session.aggregates.appearance_count(a),
                appearances_b: session.aggregates.appearance_count(b),
                shared: session.aggregates.co_occurrence(a, b),
            };
            emit(out, format, &report)
        }
        Command::Arc { character } => {
            let arc = character_arc(&session.table, character)?;
            emit(out, format, &arc)
        }
        Command::Plots { per_plot } => {
            let report = PlotsReport {
                plots: plot_leaders(&session.table, per_plot.unwrap_or(defaults.per_plot)),
            };
            emit(out, format, &report)
        }
        Command::Connections { top } => {
            let graph = session.graph(1)?;
            let report = ConnectionsReport {
                characters: connectedness(&graph, top.unwrap_or(defaults.top)),
            };
            emit(out, format, &report)
        }
        Command::Matrix { top } => {
            let graph = session.graph(1)?;
            let matrix = co_occurrence_matrix(&graph, top.unwrap_or(defaults.matrix_size));
            emit(out, format, &matrix)
        }
        Command::Clusters { min_count } => {
            let min_count = min_count.unwrap_or(defaults.min_pair_count).max(1);
            let graph = session.graph(min_count)?;
            let report = ClustersReport {
                min_count,
                clusters: clusters(&graph),
            };
            emit(out, format, &report)
        }
        Command::Config { .. } => Ok(()),
    }
}
