//! `inis-build`: Builds the INIS Thesaurus concept scheme from the extracted
//! text and writes the artifacts to the output directory.
//!
//! **Outputs:**
//! - `<out>/inis-thesaurus.jsonld`: SKOS in JSON-LD 1.1
//! - `<out>/inis-thesaurus.ttl`: OWL 2 ontology in Turtle 1.1
//!
//! **Usage:**
//! ```text
//! inis-build --input <txt> [--out <path>] [--config <toml>]
//!            [--continuation joined|one-per-line] [--title ..] [--issued ..]
//!            [--publisher ..] [--language ..] [--base-iri ..] [--verbose]
//! ```
//!
//! Exits non-zero on a duplicate label or an unresolved reference; nothing is
//! written in that case.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inis_clients::{init_tracing, load_config, summary_lines, ContinuationArg, Overrides};
use inis_conformance::{JSONLD_FILE, TURTLE_FILE};
use inis_thesaurus::pipeline;
use inis_thesaurus::serializer::{jsonld, turtle};
use tracing::info;

/// Build the INIS Thesaurus SKOS artifacts.
#[derive(Parser)]
#[command(name = "inis-build", about = "Build INIS Thesaurus SKOS/OWL artifacts")]
struct Args {
    /// Thesaurus text extracted from the PDF edition.
    #[arg(long)]
    input: PathBuf,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "public")]
    out: PathBuf,

    /// TOML file with `[parse]` and `[scheme]` tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How lines after a relationship code are read.
    #[arg(long, value_enum)]
    continuation: Option<ContinuationArg>,

    /// Scheme title.
    #[arg(long)]
    title: Option<String>,

    /// Issue date of the source edition.
    #[arg(long)]
    issued: Option<String>,

    /// Publisher name.
    #[arg(long)]
    publisher: Option<String>,

    /// Language tag for labels and notes.
    #[arg(long)]
    language: Option<String>,

    /// Namespace IRI bound to `inis:`.
    #[arg(long)]
    base_iri: Option<String>,

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
            title: args.title,
            issued: args.issued,
            publisher: args.publisher,
            language: args.language,
            base_iri: args.base_iri,
        },
    )?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    info!(input = %args.input.display(), bytes = text.len(), "read thesaurus text");

    let scheme = pipeline::run(&text, &config)
        .with_context(|| format!("Failed to build concept scheme from {}", args.input.display()))?;

    let out = &args.out;
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    // Print summary
    for line in summary_lines(&scheme) {
        println!("{line}");
    }

    // JSON-LD
    let json_path = out.join(JSONLD_FILE);
    let json_value = jsonld::to_json_ld(&scheme);
    let json_str = serde_json::to_string_pretty(&json_value)
        .context("Failed to serialize concept scheme to JSON-LD")?;
    fs::write(&json_path, &json_str)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;
    println!("  Written: {}", json_path.display());

    // Turtle
    let ttl_path = out.join(TURTLE_FILE);
    let ttl_str = turtle::to_turtle(&scheme);
    fs::write(&ttl_path, &ttl_str)
        .with_context(|| format!("Failed to write {}", ttl_path.display()))?;
    println!("  Written: {}", ttl_path.display());

    println!("Build complete.");
    Ok(())
}
