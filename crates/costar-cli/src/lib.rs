//! # costar-cli
//!
//! Command-line front end for Costar.
//!
//! Parses arguments, resolves configuration, loads a credits file and
//! prints the requested analysis as a text table or JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod output;
pub mod report;

pub use cli::{Cli, Command, ConfigAction, OutputFormat};
pub use commands::{Session, run};
pub use config::CostarConfig;
