//! `inis-conformance`: Validates the INIS Thesaurus artifacts.
//!
//! Runs the conformance suite across:
//! - SKOS JSON-LD structure and reference resolution
//! - OWL Turtle syntax (full Turtle 1.1 parse)
//! - Concept graph invariants, when the source text is given
//!
//! **Usage:**
//! ```text
//! inis-conformance [--artifacts <path>] [--input <txt>] [--config <toml>]
//!                  [--continuation joined|one-per-line]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use inis_clients::{init_tracing, load_config, ContinuationArg, Overrides};
use inis_conformance::{run_all, ArtifactPaths};

/// Run the INIS Thesaurus conformance suite.
#[derive(Parser)]
#[command(
    name = "inis-conformance",
    about = "Validate INIS Thesaurus artifacts and concept graph invariants"
)]
struct Args {
    /// Path to the built artifacts directory (default: public/).
    #[arg(long, default_value = "public")]
    artifacts: PathBuf,

    /// Thesaurus text the artifacts were built from.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Configuration used for the build.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How lines after a relationship code are read; must match the build.
    #[arg(long, value_enum)]
    continuation: Option<ContinuationArg>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(
        args.config.as_deref(),
        Overrides {
            continuation: args.continuation,
            ..Overrides::default()
        },
    )?;
    let paths = ArtifactPaths {
        artifacts: args.artifacts,
        input: args.input,
    };

    let report = run_all(&paths, &config)?;

    // Print results
    println!("INIS Thesaurus Conformance Report");
    println!("=================================");
    println!();

    for result in &report.results {
        println!("[{}] {}: {}", result.severity, result.validator, result.message);
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    let failed = report.failure_count();
    let warned = report.warning_count();
    let passed = report.results.len() - failed - warned;
    println!();
    println!("Summary: {passed} passed, {warned} warnings, {failed} failed");

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
