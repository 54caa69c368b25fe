//! # Retropad Oracle
//!
//! Reference model and test harness for a wireless-to-retro controller
//! adapter.
//!
//! Without a DUT the binary prints the records a conforming adapter should
//! produce for every scenario. With `[dut] enabled = true` it drives the
//! adapter and checks what it reports.

use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use retropad_oracle::config::Config;
use retropad_oracle::error::OracleError;
use retropad_oracle::oracle::results::{ExpectedRecords, JsonlWriter};
use retropad_oracle::oracle::Oracle;
use retropad_oracle::transport::DutClient;

/// Configuration read when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for Retropad Oracle
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, else `config/default.toml`, else defaults)
///    - Set up logging to stderr, plus an optional log file
///    - Resolve the source profile and wired system
///
/// 2. **Model only** (`[dut] enabled = false`)
///    - Print one JSON line of expected records per scenario to stdout
///
/// 3. **DUT session** (`[dut] enabled = true`)
///    - Connect, set up the session, inject every scenario
///    - Append results to the JSONL results file when enabled
///    - Handle Ctrl+C for graceful shutdown
///
/// # Errors
///
/// Returns error if:
/// - Configuration cannot be loaded
/// - The DUT cannot be reached or stops answering
/// - Any scenario did not match the model
///
/// # Examples
///
/// ```bash
/// cargo run --release -- config/default.toml > expected.jsonl
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(std::env::args().nth(1).as_deref())?;
    let _log_guard = init_logging(&config.logging.level, config.logging.file.as_deref())?;

    info!("Retropad Oracle v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut oracle = Oracle::from_config(&config.oracle)?;
    info!(
        "Profile pair: {} -> {} (deadzone {:.4})",
        config.oracle.source,
        config.oracle.destination,
        oracle.mapper().deadzone_fraction()
    );

    if !config.dut.enabled {
        return print_expected(&oracle);
    }

    let mut client = DutClient::connect(&config.dut).await?;
    let mut results = if config.results.enabled {
        Some(JsonlWriter::append(&config.results.path)?)
    } else {
        None
    };

    let summary = tokio::select! {
        summary = oracle.run(&mut client, results.as_mut()) => summary?,

        // Handle Ctrl+C for graceful shutdown
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            return Ok(());
        }
    };

    if let Some(writer) = results {
        let lines = writer.lines();
        writer.finish()?;
        info!("Wrote {} results to {}", lines, config.results.path);
    }

    if summary.failed > 0 {
        return Err(OracleError::Mismatch(summary.failed).into());
    }

    Ok(())
}

/// Load the configuration file, falling back to defaults
///
/// An explicit path must exist; the default path is optional.
fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load {}", path)),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Config::load(DEFAULT_CONFIG_PATH).with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_PATH))
        }
        None => Ok(Config::default()),
    }
}

/// Log to stderr, and to `file` when set
///
/// `RUST_LOG` overrides `level`. The returned guard flushes the file writer
/// on drop and must outlive the session.
fn init_logging(level: &str, file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{}'", level))?;

    let (file_layer, guard) = match file {
        Some(file) => {
            let path = Path::new(file);
            let name = path.file_name().context("Log file path must name a file")?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Expected records for every scenario, one JSON line each, on stdout
fn print_expected(oracle: &Oracle) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = JsonlWriter::new(BufWriter::new(stdout.lock()));

    for scenario in oracle.scenarios() {
        writer.write(&ExpectedRecords::from(&scenario))?;
    }

    let lines = writer.lines();
    writer.finish()?;
    info!("Printed expected records for {} scenarios", lines);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }

    #[test]
    fn test_load_config_without_path() {
        let config = load_config(None).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let err = load_config(Some("/nonexistent/oracle.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/oracle.toml"));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let config = Config::load(path).unwrap();
        assert!(!config.dut.enabled);
        assert!(Oracle::from_config(&config.oracle).is_ok());
    }
}
