//! INIS Thesaurus conformance suite.
//!
//! Validates the artifacts written by `inis-build` and, when the source
//! document is available, the invariants of the concept graph rebuilt from it.
//!
//! # Conformance Scope
//!
//! | Component | Standard |
//! |-----------|----------|
//! | SKOS JSON-LD | JSON-LD 1.1 structure, SKOS concept scheme shape |
//! | OWL Turtle | Turtle 1.1 (parsed with `sophia_turtle`) |
//! | Concept graph | Symmetry, top concepts, self-loops, redirect suppression |
//!
//! # Entry Point
//!
//! ```no_run
//! use inis_conformance::{run_all, ArtifactPaths};
//! use inis_thesaurus::ThesaurusConfig;
//! use std::path::PathBuf;
//!
//! let paths = ArtifactPaths {
//!     artifacts: PathBuf::from("public"),
//!     input: Some(PathBuf::from("inis-thesaurus.txt")),
//! };
//! let report = run_all(&paths, &ThesaurusConfig::default()).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod fixtures;
pub mod report;
pub mod validators;

use std::path::PathBuf;

use anyhow::Context;
use inis_thesaurus::ThesaurusConfig;

pub use report::{ConformanceReport, Severity, TestResult};

/// File name of the JSON-LD artifact.
pub const JSONLD_FILE: &str = "inis-thesaurus.jsonld";

/// File name of the Turtle artifact.
pub const TURTLE_FILE: &str = "inis-thesaurus.ttl";

/// Paths required by the conformance runner.
pub struct ArtifactPaths {
    /// Directory containing built artifacts.
    pub artifacts: PathBuf,
    /// Source thesaurus text; graph checks are skipped without it.
    pub input: Option<PathBuf>,
}

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. SKOS JSON-LD structure
/// 2. OWL Turtle syntax
/// 3. Concept graph invariants (only when `paths.input` is set)
///
/// # Errors
///
/// Returns an error if a file system operation fails or the source document
/// does not build into a concept scheme.
pub fn run_all(paths: &ArtifactPaths, config: &ThesaurusConfig) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    // 1. JSON-LD
    report.extend(validators::jsonld::validate(&paths.artifacts)?);

    // 2. Turtle
    report.extend(validators::turtle::validate(&paths.artifacts)?);

    // 3. Graph invariants
    match &paths.input {
        Some(input) => {
            let text = std::fs::read_to_string(input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            report.extend(validators::graph::validate(&text, config)?);
        }
        None => report.push(TestResult::warn(
            "graph",
            "No source document given; graph invariant checks skipped",
        )),
    }

    Ok(report)
}
