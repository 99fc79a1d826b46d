use std::path::PathBuf;

use clap::Parser;

/// Estimate the savings a home battery adds to a solar installation.
///
/// Without `--input`, a seeded synthetic year is analyzed.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Hourly input table (CSV, XLSX, XLS or ODS) with date, hour, solar and
    /// electricity columns.
    #[clap(long, env = "SOLAR_SAVINGS_INPUT")]
    pub input: Option<PathBuf>,

    /// Load analysis parameters from a TOML file.
    #[clap(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Use a built-in parameter preset (baseline, legacy, discharge).
    #[clap(long)]
    pub preset: Option<String>,

    /// Seed for the synthetic year used when no input is given.
    #[clap(long, default_value = "42")]
    pub seed: u64,

    /// Write the derived hourly series to this CSV file.
    #[clap(long = "hourly-out")]
    pub hourly_out: Option<PathBuf>,

    /// Write the report summary to this JSON file.
    #[clap(long = "summary-out")]
    pub summary_out: Option<PathBuf>,

    /// Serve the finished report over HTTP after the analysis.
    #[cfg(feature = "api")]
    #[clap(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[clap(long, default_value = "3000", env = "SOLAR_SAVINGS_PORT")]
    pub port: u16,
}
