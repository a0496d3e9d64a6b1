//! Utility modules shared across Costar crates.
//!
//! # Modules
//!
//! - [`paths`]: Tilde expansion and project environment variable naming

pub mod paths;
