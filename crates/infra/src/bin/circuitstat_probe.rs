//! Sends one window of circuit metrics to the configured DogStatsD agent.
//!
//! Run with: `circuitstat-probe <circuit-name> [snapshot-file]`
//!
//! The snapshot file is a JSON or TOML `MetricResult`. Without one, a window
//! with a single successful attempt is sent. Useful for checking that an
//! agent receives `hystrix.*` metrics before wiring up real circuits.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::Path;
use std::process::ExitCode;
use std::{env, fs};

use anyhow::{anyhow, bail, Context};
use circuitstat_core::{CollectorRegistry, MetricCollector};
use circuitstat_domain::{Config, MetricResult};
use circuitstat_infra::config;
use circuitstat_infra::observability::logging::init_tracing;
use circuitstat_infra::new_datadog_collector;

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(circuit) = args.next() else {
        print_help();
        return ExitCode::FAILURE;
    };
    if circuit == "help" || circuit == "--help" || circuit == "-h" {
        print_help();
        return ExitCode::SUCCESS;
    }

    match run(&circuit, args.next().as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(circuit: &str, snapshot: Option<&str>) -> anyhow::Result<()> {
    if circuit.trim().is_empty() {
        bail!("circuit name must not be empty");
    }

    let config = config::load().unwrap_or_else(|e| {
        eprintln!("No configuration found ({e}), using defaults");
        Config::default()
    });
    init_tracing(&config.logging).map_err(|e| anyhow!(e))?;

    let window = match snapshot {
        Some(path) => read_snapshot(Path::new(path))?,
        None => MetricResult { attempts: 1, successes: 1, ..MetricResult::default() },
    };

    let registry = CollectorRegistry::new();
    registry.register(
        new_datadog_collector(&config.statsd)
            .map_err(|e| anyhow!(e))
            .context("failed to create DogStatsD client")?,
    );

    let collectors = registry.initialize(circuit);
    collectors.record(&window);

    tracing::info!(
        circuit,
        agent = %config.statsd.address,
        attempts = window.attempts,
        "Sent circuit metrics"
    );
    println!("Sent window for circuit '{circuit}' to {}", config.statsd.address);
    Ok(())
}

fn read_snapshot(path: &Path) -> anyhow::Result<MetricResult> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&contents).context("invalid TOML snapshot"),
        _ => serde_json::from_str(&contents).context("invalid JSON snapshot"),
    }
}

fn print_help() {
    println!("Usage: circuitstat-probe <circuit-name> [snapshot-file]");
    println!();
    println!("Sends one metrics window for <circuit-name> to the DogStatsD agent.");
    println!("The snapshot file is a JSON or TOML MetricResult; when omitted a");
    println!("single successful attempt is sent.");
    println!();
    println!("Configuration comes from CIRCUITSTAT_* environment variables or a");
    println!("config.toml / circuitstat.toml file.");
}
