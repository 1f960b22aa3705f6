//! Shared plumbing for the INIS client binaries: logging setup, layered
//! configuration and the build summary.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use inis_thesaurus::{ConceptScheme, ContinuationMode, ThesaurusConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `verbose`. Log lines go to stderr so stdout carries only the summary.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second initialization (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// `--continuation` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContinuationArg {
    /// Join continuation lines into the previous target.
    Joined,
    /// Treat every continuation line as its own target.
    OnePerLine,
}

impl From<ContinuationArg> for ContinuationMode {
    fn from(arg: ContinuationArg) -> Self {
        match arg {
            ContinuationArg::Joined => ContinuationMode::Joined,
            ContinuationArg::OnePerLine => ContinuationMode::OnePerLine,
        }
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Continuation rule.
    pub continuation: Option<ContinuationArg>,
    /// Scheme title.
    pub title: Option<String>,
    /// Issue date.
    pub issued: Option<String>,
    /// Publisher.
    pub publisher: Option<String>,
    /// Language tag.
    pub language: Option<String>,
    /// Base IRI.
    pub base_iri: Option<String>,
}

/// Loads the configuration file (defaults when absent) and applies `overrides`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid configuration.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<ThesaurusConfig> {
    let mut config = match path {
        Some(path) => ThesaurusConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => ThesaurusConfig::default(),
    };
    if let Some(mode) = overrides.continuation {
        config.parse.continuation = mode.into();
    }
    let scheme = &mut config.scheme;
    if let Some(title) = overrides.title {
        scheme.title = title;
    }
    if let Some(base_iri) = overrides.base_iri {
        scheme.base_iri = base_iri;
    }
    scheme.issued = overrides.issued.or(scheme.issued.take());
    scheme.publisher = overrides.publisher.or(scheme.publisher.take());
    scheme.language = overrides.language.or(scheme.language.take());
    Ok(config)
}

/// Example warnings listed per kind in the summary.
const WARNING_EXAMPLES: usize = 3;

/// Human-readable build summary: counts, pipeline statistics, warnings by kind
/// with the first few examples.
#[must_use]
pub fn summary_lines(scheme: &ConceptScheme) -> Vec<String> {
    let stats = scheme.stats();
    let mut lines = vec![
        format!(
            "{}: {} concepts, {} top concepts, {} alternate labels, {} broader edges, {} related pairs",
            scheme.metadata().title,
            scheme.concept_count(),
            scheme.top_concept_count(),
            scheme.alt_label_count(),
            scheme.broader_edge_count(),
            scheme.related_pair_count()
        ),
        format!(
            "  {} blocks, {} redirect blocks, {} redirects applied, {} forward references, {} edges added by symmetry",
            stats.blocks,
            stats.redirect_blocks,
            stats.redirects_applied,
            stats.forward_references,
            stats.symmetric_edges_added
        ),
    ];

    let counts = scheme.warning_counts();
    if counts.is_empty() {
        lines.push("  No warnings.".to_owned());
        return lines;
    }
    for (kind, count) in counts {
        lines.push(format!("  {kind}: {count} warning(s)"));
        for warning in scheme
            .warnings()
            .filter(|w| w.kind == kind)
            .take(WARNING_EXAMPLES)
        {
            lines.push(format!("    {}: {}", warning.label, warning.message));
        }
    }
    lines
}
