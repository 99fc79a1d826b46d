//! Solar savings entry point: CLI wiring, logging, and output.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solar_savings::config::AnalysisConfig;
use solar_savings::io::export::{export_csv, export_summary_json};
use solar_savings::io::import::load_records;
use solar_savings::pipeline::analyze;
use solar_savings::synthetic::SyntheticYear;

use crate::cli::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // --config takes priority, then --preset, then baseline default
    let config = if let Some(ref path) = args.config {
        AnalysisConfig::from_toml_file(path)?
    } else if let Some(ref name) = args.preset {
        AnalysisConfig::from_preset(name)?
    } else {
        AnalysisConfig::baseline()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("{} invalid configuration value(s)", errors.len());
    }

    let raw = if let Some(ref path) = args.input {
        load_records(path).with_context(|| format!("failed to load {}", path.display()))?
    } else {
        info!(seed = args.seed, "no input given; analyzing a synthetic year");
        SyntheticYear::with_seed(args.seed).generate()
    };

    let report = analyze(raw, &config);
    println!("{report}");

    if let Some(ref path) = args.hourly_out {
        export_csv(&report.records, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "hourly series written");
    }

    if let Some(ref path) = args.summary_out {
        export_summary_json(&report, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_savings::api::AppState { report });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(solar_savings::api::serve(state, addr))
            .context("API server failed")?;
    }

    Ok(())
}
