//! Loading credit tables from delimited text.
//!
//! Two layouts are understood:
//!
//! - **Long**: one row per credit, with named episode and character columns
//!   and an optional plot column.
//! - **Wide**: one row per character. The first column holds the character
//!   name, every further column header is an episode id, and a cell value
//!   greater than zero means the character is credited in that episode. A
//!   row labelled with the plot-row label maps episodes to plot groups.
//!
//! Malformed rows never abort a load. They are logged, skipped, and listed
//! in the returned [`LoadReport`]. Only a missing or unreadable file is fatal.

use crate::credits::{CreditTable, EpisodeId, PlotId};
use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// Options
// ============================================================================

/// Layout of a credits file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Pick long or wide from the header row.
    #[default]
    Auto,
    /// One row per credit.
    Long,
    /// One row per character, one column per episode.
    Wide,
}

impl DatasetFormat {
    /// Returns the format name as used in config files and flags.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Long => "long",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "long" => Ok(Self::Long),
            "wide" | "matrix" => Ok(Self::Wide),
            other => Err(Error::config(format!(
                "Unknown dataset format '{other}' (expected auto, long, or wide)"
            ))),
        }
    }
}

/// Options controlling how a credits file is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Layout of the file.
    pub format: DatasetFormat,
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Episode column name (long layout).
    pub episode_column: String,
    /// Character column name (long layout).
    pub character_column: String,
    /// Optional plot column name (long layout).
    pub plot_column: String,
    /// First-cell label of the plot row (wide layout).
    pub plot_row_label: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: DatasetFormat::Auto,
            delimiter: b',',
            episode_column: "episode".to_string(),
            character_column: "character".to_string(),
            plot_column: "plot".to_string(),
            plot_row_label: "plot".to_string(),
        }
    }
}

impl LoadOptions {
    /// Creates options with the default column names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file layout.
    pub fn with_format(mut self, format: DatasetFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the episode and character column names.
    pub fn with_columns(
        mut self,
        episode_column: impl Into<String>,
        character_column: impl Into<String>,
    ) -> Self {
        self.episode_column = episode_column.into();
        self.character_column = character_column.into();
        self
    }

    /// Sets the plot column name (long layout).
    pub fn with_plot_column(mut self, plot_column: impl Into<String>) -> Self {
        self.plot_column = plot_column.into();
        self
    }

    /// Sets the plot row label (wide layout).
    pub fn with_plot_row_label(mut self, label: impl Into<String>) -> Self {
        self.plot_row_label = label.into();
        self
    }
}

// ============================================================================
// Report
// ============================================================================

/// A data row that was skipped during loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the input.
    pub line: u64,
    /// Why the row was skipped.
    pub reason: String,
}

/// Statistics from a load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Layout actually used (never `Auto`, unless the file was empty).
    pub format: DatasetFormat,
    /// Data rows read, excluding the header.
    pub rows_read: usize,
    /// Distinct credits stored.
    pub credits: usize,
    /// Credits that repeated an existing (episode, character) pair.
    pub duplicates: usize,
    /// Wide-layout cells that were not numbers and were read as zero.
    pub coerced_cells: usize,
    /// Episodes given more than one plot group (first one kept).
    pub plot_conflicts: usize,
    /// Rows that were skipped.
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    /// Returns true if nothing had to be skipped, collapsed, or coerced.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
            && self.duplicates == 0
            && self.coerced_cells == 0
            && self.plot_conflicts == 0
    }

    fn skip(&mut self, line: u64, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Skipping line {line}: {reason}");
        self.skipped.push(SkippedRow { line, reason });
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Loads a credits file.
///
/// Fails fast if the file cannot be opened; a missing file yields an
/// [`Error::Io`] whose [`Error::is_not_found`] is true.
pub fn load_credits(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<(CreditTable, LoadReport)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io_with_path(e, path))?;
    log::debug!("Loading credits from {}", path.display());
    load_credits_from_reader(file, options)
}

/// Loads credits from any reader, e.g. an in-memory string.
pub fn load_credits_from_reader<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<(CreditTable, LoadReport)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut report = LoadReport::default();
    let mut table = CreditTable::new();

    if headers.is_empty() {
        log::debug!("Credits input is empty");
        return Ok((table, report));
    }

    let format = resolve_format(options, &headers);
    report.format = format;

    let mut loader: Box<dyn RowLoader> = match format {
        DatasetFormat::Long | DatasetFormat::Auto => Box::new(LongLoader::new(options, &headers)?),
        DatasetFormat::Wide => Box::new(WideLoader::new(options, &headers, &mut table)),
    };

    for (index, result) in reader.records().enumerate() {
        // Header is line 1, so the first data row is line 2 when the
        // reader cannot tell us.
        let fallback_line = index as u64 + 2;
        match result {
            Ok(record) => {
                report.rows_read += 1;
                let line = record.position().map_or(fallback_line, |p| p.line());
                loader.load_row(line, &record, &mut table, &mut report);
            }
            Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
            Err(e) => {
                report.rows_read += 1;
                let line = e.position().map_or(fallback_line, |p| p.line());
                report.skip(line, format!("unreadable record: {e}"));
            }
        }
    }

    report.credits = table.credit_count();
    log::debug!(
        "Loaded {} credits across {} episodes ({} rows, {} skipped, {} duplicates)",
        report.credits,
        table.episode_count(),
        report.rows_read,
        report.skipped.len(),
        report.duplicates
    );

    Ok((table, report))
}

fn resolve_format(options: &LoadOptions, headers: &StringRecord) -> DatasetFormat {
    match options.format {
        DatasetFormat::Auto => {
            let has = |name: &str| headers.iter().any(|h| h == name);
            if has(&options.episode_column) && has(&options.character_column) {
                DatasetFormat::Long
            } else {
                DatasetFormat::Wide
            }
        }
        explicit => explicit,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Per-layout row handling.
trait RowLoader {
    fn load_row(
        &mut self,
        line: u64,
        record: &StringRecord,
        table: &mut CreditTable,
        report: &mut LoadReport,
    );
}

// ----------------------------------------------------------------------------
// Long layout
// ----------------------------------------------------------------------------

struct LongLoader {
    episode_idx: usize,
    character_idx: usize,
    plot_idx: Option<usize>,
}

impl LongLoader {
    fn new(options: &LoadOptions, headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let episode_idx = find(&options.episode_column).ok_or_else(|| {
            Error::parse(format!(
                "Missing episode column '{}' in header",
                options.episode_column
            ))
        })?;
        let character_idx = find(&options.character_column).ok_or_else(|| {
            Error::parse(format!(
                "Missing character column '{}' in header",
                options.character_column
            ))
        })?;
        Ok(Self {
            episode_idx,
            character_idx,
            plot_idx: find(&options.plot_column),
        })
    }
}

impl RowLoader for LongLoader {
    fn load_row(
        &mut self,
        line: u64,
        record: &StringRecord,
        table: &mut CreditTable,
        report: &mut LoadReport,
    ) {
        let Some(episode) = non_empty(record.get(self.episode_idx)) else {
            report.skip(line, "missing episode field");
            return;
        };
        let Some(character) = non_empty(record.get(self.character_idx)) else {
            report.skip(line, "missing character field");
            return;
        };
        let episode = EpisodeId::new(episode);

        if let Some(plot) = self.plot_idx.and_then(|idx| non_empty(record.get(idx))) {
            let plot = PlotId::new(plot);
            if let Some(existing) = table.set_plot(episode.clone(), plot.clone()) {
                if existing != plot {
                    log::warn!(
                        "Line {line}: episode {episode} already in plot {existing}, ignoring plot {plot}"
                    );
                    report.plot_conflicts += 1;
                }
            }
        }

        if !table.insert(episode, character) {
            log::debug!("Line {line}: duplicate credit for {character}");
            report.duplicates += 1;
        }
    }
}

// ----------------------------------------------------------------------------
// Wide layout
// ----------------------------------------------------------------------------

struct WideLoader {
    episodes: Vec<Option<EpisodeId>>,
    plot_row_label: String,
}

impl WideLoader {
    fn new(options: &LoadOptions, headers: &StringRecord, table: &mut CreditTable) -> Self {
        let episodes: Vec<Option<EpisodeId>> = headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, header)| {
                if header.trim().is_empty() {
                    log::warn!("Ignoring episode column {} with an empty header", col + 1);
                    None
                } else {
                    let episode = EpisodeId::new(header);
                    table.add_episode(episode.clone());
                    Some(episode)
                }
            })
            .collect();
        Self {
            episodes,
            plot_row_label: options.plot_row_label.clone(),
        }
    }

    fn cells<'r>(
        &'r self,
        record: &'r StringRecord,
    ) -> impl Iterator<Item = (&'r EpisodeId, &'r str)> + 'r {
        self.episodes
            .iter()
            .zip(record.iter().skip(1))
            .filter_map(|(episode, cell)| episode.as_ref().map(|ep| (ep, cell.trim())))
    }
}

impl RowLoader for WideLoader {
    fn load_row(
        &mut self,
        line: u64,
        record: &StringRecord,
        table: &mut CreditTable,
        report: &mut LoadReport,
    ) {
        let Some(name) = non_empty(record.get(0)) else {
            report.skip(line, "missing character name");
            return;
        };

        if name == self.plot_row_label {
            for (episode, cell) in self.cells(record) {
                if cell.is_empty() {
                    continue;
                }
                let plot = PlotId::new(cell);
                if let Some(existing) = table.set_plot(episode.clone(), plot.clone()) {
                    if existing != plot {
                        log::warn!(
                            "Line {line}: episode {episode} already in plot {existing}, ignoring plot {plot}"
                        );
                        report.plot_conflicts += 1;
                    }
                }
            }
            return;
        }

        for (episode, cell) in self.cells(record) {
            if cell.is_empty() {
                continue;
            }
            let credited = match cell.parse::<f64>() {
                Ok(value) => value > 0.0,
                Err(_) => {
                    log::warn!(
                        "Line {line}: non-numeric cell '{cell}' for {name} in episode {episode}, reading as 0"
                    );
                    report.coerced_cells += 1;
                    false
                }
            };
            if credited && !table.insert(episode.clone(), name) {
                report.duplicates += 1;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
