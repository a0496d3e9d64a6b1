//! Common test utilities for costar CLI integration tests.

#![allow(dead_code)]

use clap::Parser;
use costar_cli::{Cli, run};
use costar_core::Result;
use std::path::PathBuf;
use tempfile::TempDir;

/// Credits in long layout. Line 9 repeats a credit.
pub const LONG_CSV: &str = "\
episode,character,plot
1,Rose,1
1,Doctor,1
2,Rose,1
2,Mickey,1
3,Rose,2
3,Doctor,2
3,Mickey,2
3,Rose,2
";

/// The same credits in wide layout, plus an empty episode 4.
pub const WIDE_CSV: &str = "\
episode,1,2,3,4
plot,1,1,2,2
Rose,1,1,1,0
Doctor,1,0,1,0
Mickey,0,1,1,0
";

/// Temporary directory holding a dataset and a config file.
///
/// Every run passes `--config` explicitly so the user's own
/// configuration is never read.
pub struct TestHarness {
    dir: TempDir,
    /// Path of the config file.
    pub config: PathBuf,
}

impl TestHarness {
    /// Creates a harness with an empty config file.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").expect("write config");
        Self { dir, config }
    }

    /// Writes a file into the harness directory and returns its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write file");
        path
    }

    /// Replaces the config file contents.
    pub fn set_config(&self, contents: &str) {
        std::fs::write(&self.config, contents).expect("write config");
    }

    /// Path inside the harness directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Runs `costar <args> --config <config>` and returns stdout.
    pub fn try_run(&self, args: &[&str]) -> Result<String> {
        let config = self.config.display().to_string();
        let argv = std::iter::once("costar")
            .chain(args.iter().copied())
            .chain(["--config", config.as_str()]);
        let cli = Cli::try_parse_from(argv).expect("valid arguments");
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    /// Like [`TestHarness::try_run`], panicking on error.
    pub fn run(&self, args: &[&str]) -> String {
        self.try_run(args).expect("command should succeed")
    }

    /// Runs with `--output json` and parses the result.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut args = args.to_vec();
        args.extend(["--output", "json"]);
        serde_json::from_str(&self.run(&args)).expect("valid json")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Harness with [`LONG_CSV`] written as `credits.csv`; returns the data path too.
pub fn long_dataset() -> (TestHarness, String) {
    let harness = TestHarness::new();
    let path = harness.write("credits.csv", LONG_CSV);
    (harness, path.display().to_string())
}

/// Harness with [`WIDE_CSV`] written as `wide.csv`; returns the data path too.
pub fn wide_dataset() -> (TestHarness, String) {
    let harness = TestHarness::new();
    let path = harness.write("wide.csv", WIDE_CSV);
    (harness, path.display().to_string())
}
