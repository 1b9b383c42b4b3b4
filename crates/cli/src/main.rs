//! # setmerge - merge SET files
//!
//! Concatenates the entries of two or more SET files into one output file
//! whose header carries the combined entry count.
//!
//! ## Usage
//!
//! ```text
//! setmerge [-e] [-f] set1 set2 [...] output
//!
//!   -e, --little-endian   headers are little-endian (default: big-endian)
//!   -f, --force           overwrite the output without asking
//! ```
//!
//! ## Configuration
//!
//! ```text
//! SETMERGE_LITTLE_ENDIAN  same as -e when true  (default: false)
//! SETMERGE_FORCE          same as -f when true  (default: false)
//! SETMERGE_LOG            tracing filter        (default: "warn")
//! ```
//!
//! ## Exit status
//!
//! ```text
//! 0  success
//! 1  I/O error, truncated input, or overwrite declined
//! 2  bad arguments
//! ```
//!
//! ## Example
//!
//! ```text
//! $ setmerge a.set b.set merged.set
//! 2 files have been successfully merged into merged.set.
//! ```

mod prompt;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use config::{ConfigError, EnvDefaults, MergeConfig};
use engine::{MergeError, MergeReport, SetMerger};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_ERROR: u8 = 1;
const EXIT_SYNTAX: u8 = 2;

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "SETMERGE_LOG";

/// Merge two or more SET files into one.
#[derive(Parser, Debug)]
#[command(name = "setmerge", version)]
#[command(override_usage = "setmerge [-e] [-f] set1 set2 [...] output")]
struct Cli {
    /// Treat all headers as little-endian (default: big-endian)
    #[arg(short = 'e', long = "little-endian")]
    little_endian: bool,

    /// Overwrite the output file without asking
    #[arg(short = 'f', long)]
    force: bool,

    /// Input SET files followed by the output path
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    paths: Vec<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn usage_error(err: &ConfigError) -> ExitCode {
    eprintln!("error: {}", err);
    eprintln!();
    eprintln!("{}", Cli::command().render_usage());
    ExitCode::from(EXIT_SYNTAX)
}

fn run(cfg: &MergeConfig) -> Result<MergeReport> {
    tracing::debug!(
        inputs = cfg.inputs.len(),
        output = %cfg.output.display(),
        endianness = %cfg.endianness,
        overwrite = ?cfg.overwrite,
        "starting merge"
    );
    let mut merger = SetMerger::from_config(cfg);
    let report = merger
        .merge_config(cfg, prompt::confirm_overwrite)
        .with_context(|| format!("merging into {}", cfg.output.display()))?;
    Ok(report)
}

fn main() -> ExitCode {
    // Help, version and argument errors exit here (status 2 on errors).
    let cli = Cli::parse();
    init_tracing();

    let env = match EnvDefaults::from_env() {
        Ok(env) => env,
        Err(e) => return usage_error(&e),
    };
    let cfg = match MergeConfig::resolve(cli.paths, cli.little_endian, cli.force, env) {
        Ok(cfg) => cfg,
        Err(e) => return usage_error(&e),
    };

    match run(&cfg) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(MergeError::UserAborted { .. }) = e.downcast_ref::<MergeError>() {
                println!("Aborting. No changes have been made.");
            } else {
                eprintln!("error: {:#}", e);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}
