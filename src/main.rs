//! Application entry point for the `agave-estimator` binary.
//!
//! This binary orchestrates the startup sequence and then runs the command
//! shell for one session:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing (to stderr)
//! - Seeding the production table
//! - Reading commands from stdin and writing one JSON reply per command to stdout
//!
//! # Environment Variables
//! - `ESTIMATOR_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//! - `ESTIMATOR_SPAN_EVENTS` (optional) – span event mode for tracing
//! - see `config` for the seed and output settings
//!
//! This module follows the Explicit Module Boundary Pattern (EMBP) by
//! delegating configuration parsing to `config`, table ownership to
//! `estimator` and command handling to `commands`.
use std::{
    env,
    io::{self, BufRead, Write},
};

use anyhow::Result;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use agave_estimator::{
    commands::{self, Reply},
    config, Estimator,
};

// ---

fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let mut estimator = Estimator::seeded(&cfg.seed);
    tracing::info!(
        "Seeded {} batches across {} months",
        estimator.rows().len(),
        estimator.monthly_aggregates().len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        match commands::dispatch(&mut estimator, &line) {
            Reply::Quit => break,
            Reply::Nothing => continue,
            Reply::Json(value) => {
                let text = if cfg.pretty_json {
                    serde_json::to_string_pretty(&value)?
                } else {
                    serde_json::to_string(&value)?
                };
                writeln!(stdout, "{text}")?;
                stdout.flush()?;
            }
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Output on stderr, so stdout carries only command replies
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY on stderr
/// - Span event emission mode controlled by the `ESTIMATOR_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by `RUST_LOG`, falling back to `ESTIMATOR_LOG_LEVEL`
///
/// This should be called once at startup before any logging or tracing
/// macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("ESTIMATOR_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => io::stderr().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("ESTIMATOR_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "info",
        };
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
