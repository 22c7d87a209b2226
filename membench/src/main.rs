use std::process::ExitCode;

use anyhow::Context;
use cfg::Cfg;
use clap::Parser;
use configuration::{Configuration, Outcome};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

pub mod cfg;

/// Exit code for a command line that could not be parsed.
const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    init_tracing();
    run(std::env::args().skip(1))
}

/// Logs go to stderr; stdout carries only the configuration report.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Runs the benchmark front end on `args` (without the program name).
fn run(args: impl IntoIterator<Item = String>) -> ExitCode {
    let args = std::iter::once(configuration::PROGRAM.to_string()).chain(args);
    let cfg = match Cfg::try_parse_from(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            // clap reports a missing mode with the mode list and exit code 2
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(USAGE_ERROR));
        }
    };

    match configure(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(USAGE_ERROR)
        }
    }
}

fn configure(cfg: Cfg) -> anyhow::Result<()> {
    let mode = cfg.mode;
    let outcome = Configuration::new(mode)
        .parse(cfg.options)
        .with_context(|| format!("invalid options for {mode} mode"))?;

    match outcome {
        Outcome::HelpRequested(usage) => eprintln!("{usage}"),
        Outcome::Parsed(settings) => {
            tracing::info!(%mode, title = mode.title(), "running configuration");
            for violation in settings.domain_violations(mode) {
                tracing::warn!("{violation}, it is reported as invalid");
            }
            settings.dump();
        }
    }
    Ok(())
}
