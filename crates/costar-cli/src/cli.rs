//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use costar_core::DatasetFormat;

/// Costar - character appearance and co-occurrence analysis
#[derive(Parser, Debug)]
#[command(name = "costar")]
#[command(author, version, about = "Character appearance and co-occurrence analysis for episode credits", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Credits file to analyse (overrides dataset.path)
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Layout of the credits file: auto, long, or wide
    #[arg(short, long, global = true)]
    pub layout: Option<DatasetFormat>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// How results are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dataset statistics with the top characters and pairs
    Summary {
        /// Number of rows per list
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Characters ranked by number of episodes
    Appearances {
        /// Number of characters to list
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Character pairs ranked by shared episodes
    Pairs {
        /// Number of pairs to list
        #[arg(short = 'n', long)]
        top: Option<usize>,
        /// Only list the partners of this character
        #[arg(long)]
        character: Option<String>,
    },
    /// Shared episodes of two characters
    Pair {
        /// First character
        a: String,
        /// Second character
        b: String,
    },
    /// Episode-by-episode presence of one character
    Arc {
        /// Character name (exact, case-sensitive)
        character: String,
    },
    /// Top characters within each plot group
    Plots {
        /// Characters listed per plot group
        #[arg(short = 'k', long)]
        per_plot: Option<usize>,
    },
    /// Characters ranked by total co-occurrence
    Connections {
        /// Number of characters to list
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Co-occurrence matrix of the most connected characters
    Matrix {
        /// Number of characters in the matrix
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Groups of characters linked through shared episodes
    Clusters {
        /// Ignore pairs sharing fewer episodes than this
        #[arg(long)]
        min_count: Option<usize>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. report.top)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config location)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export {
        /// Format as docker --env flags
        #[arg(long)]
        docker_env: bool,
    },
}
