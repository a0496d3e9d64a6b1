//! Costar configuration.
//!
//! Loaded from TOML (see [`ConfigManager`] for the resolution order).
//! Every field has a default, so an empty or partial file is valid.
//!
//! ```toml
//! [dataset]
//! path = "~/data/credits.csv"
//! layout = "auto"
//! delimiter = ","
//! episode_column = "episode"
//! character_column = "character"
//! plot_column = "plot"
//! plot_row_label = "plot"
//!
//! [report]
//! top = 10
//! per_plot = 3
//! matrix_size = 15
//! min_pair_count = 1
//! ```

use costar_core::util::paths::expand_tilde;
use costar_core::{ConfigManager, DatasetFormat, Error, LoadOptions, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostarConfig {
    /// Where and how to read credits.
    pub dataset: DatasetConfig,
    /// Report sizes.
    pub report: ReportConfig,
}

/// `[dataset]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Credits file; `--data` takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File layout.
    pub layout: DatasetFormat,
    /// Field delimiter: a single character, or `tab`.
    pub delimiter: String,
    /// Episode column (long layout).
    pub episode_column: String,
    /// Character column (long layout).
    pub character_column: String,
    /// Plot column (long layout).
    pub plot_column: String,
    /// Plot row label (wide layout).
    pub plot_row_label: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        let options = LoadOptions::default();
        Self {
            path: None,
            layout: options.format,
            delimiter: ",".to_string(),
            episode_column: options.episode_column,
            character_column: options.character_column,
            plot_column: options.plot_column,
            plot_row_label: options.plot_row_label,
        }
    }
}

/// `[report]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows in ranked lists.
    pub top: usize,
    /// Characters listed per plot group.
    pub per_plot: usize,
    /// Characters in the co-occurrence matrix.
    pub matrix_size: usize,
    /// Minimum shared episodes for a pair to link a cluster.
    pub min_pair_count: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top: 10,
            per_plot: 3,
            matrix_size: 15,
            min_pair_count: 1,
        }
    }
}

impl ConfigManager for CostarConfig {
    fn project_name() -> &'static str {
        "costar"
    }
}

impl DatasetConfig {
    /// Parse the delimiter setting into a single byte.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_str() {
            "tab" | "\\t" | "\t" => Ok(b'\t'),
            d if d.len() == 1 && d.is_ascii() => Ok(d.as_bytes()[0]),
            other => Err(Error::config(format!(
                "dataset.delimiter must be a single ASCII character, got '{other}'"
            ))),
        }
    }
}

impl CostarConfig {
    /// Loader options from the `[dataset]` section, with an optional
    /// layout override from the command line.
    pub fn load_options(&self, layout: Option<DatasetFormat>) -> Result<LoadOptions> {
        let dataset = &self.dataset;
        Ok(LoadOptions::new()
            .with_format(layout.unwrap_or(dataset.layout))
            .with_delimiter(dataset.delimiter_byte()?)
            .with_columns(&dataset.episode_column, &dataset.character_column)
            .with_plot_column(&dataset.plot_column)
            .with_plot_row_label(&dataset.plot_row_label))
    }

    /// Resolve the credits file, preferring the command-line path.
    pub fn dataset_path(&self, cli_path: Option<&str>) -> Result<PathBuf> {
        cli_path
            .or(self.dataset.path.as_deref())
            .map(expand_tilde)
            .ok_or_else(|| {
                Error::config("No credits file given: pass --data or set dataset.path")
            })
    }
}
