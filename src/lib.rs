//! # hemikit
//!
//! Generates RepRap-style G-code for printing a spherical surface as one
//! continuous spiral, plus a few calibration shapes.
//!
//! ## Architecture
//!
//! hemikit is organized as a workspace with multiple crates:
//!
//! 1. **hemikit-core** - Positions, printer profile, tracer settings, errors
//! 2. **hemikit-camtools** - Motion writer, session bracketing, profile solver,
//!    adaptive hemispiral tracer and the simple shapes
//! 3. **hemikit-settings** - TOML/JSON configuration files
//! 4. **hemikit** - Command-line binary that ties the crates together
//!
//! Output is deterministic: the same config and job always produce the same
//! bytes unless a header timestamp is requested.

pub mod cli;
pub mod jobs;

use anyhow::Context;
use hemikit_camtools::{run_session, GcodeWriter, SessionHeader};
use hemikit_settings::Config;
use std::io::Write;

pub use hemikit_camtools::{CamToolError, CamToolResult};
pub use hemikit_core::{Error, PartialPosition, Position, PrinterProfile, Result, TraceSettings};
pub use jobs::Job;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so that G-code written to stdout stays clean.
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level
/// (0 info, 1 debug, 2 or more trace).
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}

/// Write a complete program (header, preamble, job body, coda) to `out`
/// and hand the sink back.
pub fn write_program<W: Write>(
    out: W,
    config: &Config,
    job: &Job,
    header: &SessionHeader,
) -> anyhow::Result<W> {
    config.validate().context("Invalid configuration")?;

    let mut writer = GcodeWriter::new(out, config.printer.clone());
    run_session(&mut writer, header, |g| job.run(g, &config.trace))
        .with_context(|| format!("Failed to generate {} job", job.name()))?;
    Ok(writer.into_inner())
}
