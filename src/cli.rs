//! CLI argument parsing for perfcmp

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable columnar report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "perfcmp")]
#[command(version)]
#[command(
    about = "Compare before/after benchmark results with outlier rejection and t-test significance",
    long_about = None
)]
pub struct Cli {
    /// CSV file with the 'before' results (default: <TEST>.before.csv)
    #[arg(value_name = "BEFORE")]
    pub before: Option<PathBuf>,

    /// CSV file with the 'after' results (default: <TEST>.after.csv)
    #[arg(value_name = "AFTER")]
    pub after: Option<PathBuf>,

    /// Name of output CSV file to write numeric results to
    #[arg(short = 'c', long = "csv", value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Invert the sense of the comparison to "lower is better"
    #[arg(short = 'i', long = "invert")]
    pub invert: bool,

    /// Minimum confidence level for a significant result (percent, default 99.0)
    #[arg(short = 'm', long = "min-conf", value_name = "PERCENT")]
    pub min_conf: Option<f64>,

    /// When sorting results, output in reverse (ascending) order
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,

    /// Omit results which are considered to be insignificant
    #[arg(short = 's', long = "significant")]
    pub significant: bool,

    /// Name of the test sequence
    #[arg(short = 't', long = "test", value_name = "NAME", default_value = "")]
    pub test: String,

    /// Don't sort the results by percentage difference
    #[arg(short = 'u', long = "unsorted")]
    pub unsorted: bool,

    /// Output verbose progress information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file (invert, min_confidence, labels)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve the before/after input paths
    ///
    /// Files given on the command line win; otherwise they are derived from
    /// the test name as `<TEST>.before.csv` and `<TEST>.after.csv`.
    pub fn input_files(&self) -> Result<(PathBuf, PathBuf), String> {
        let derive = |suffix: &str| -> Option<PathBuf> {
            if self.test.is_empty() {
                None
            } else {
                Some(PathBuf::from(format!("{}.{}.csv", self.test, suffix)))
            }
        };

        let before = self
            .before
            .clone()
            .or_else(|| derive("before"))
            .ok_or_else(|| "CSV file for 'before' results not specified".to_string())?;
        let after = self
            .after
            .clone()
            .or_else(|| derive("after"))
            .ok_or_else(|| "CSV file for 'after' results not specified".to_string())?;

        Ok((before, after))
    }
}
