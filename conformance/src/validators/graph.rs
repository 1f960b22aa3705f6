//! Concept graph invariant validator.
//!
//! Rebuilds the concept scheme from the source document and checks the
//! invariants every frozen scheme must satisfy:
//! - `B ∈ A.broader ⇔ A ∈ B.narrower` and `B ∈ A.related ⇔ A ∈ B.related`
//! - `is_top_concept ⇔ broader = ∅`
//! - No concept relates to itself
//! - Every relation names an existing concept
//! - A redirect-source label has no concept and is an alternate label
//!
//! Extraction warnings are reported as non-blocking results.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use inis_thesaurus::parser::extract_all;
use inis_thesaurus::{pipeline, ConceptId, ConceptScheme, ThesaurusConfig};
use tracing::debug;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "graph";

/// Builds the scheme from `text` and validates it.
///
/// # Errors
///
/// Returns an error if the document does not build (duplicate labels or
/// unresolved references).
pub fn validate(text: &str, config: &ThesaurusConfig) -> Result<ConformanceReport> {
    let scheme =
        pipeline::run(text, config).context("Failed to build the concept scheme from the source")?;

    let mut report = validate_scheme(&scheme);

    let redirect_sources: Vec<String> = extract_all(text, &config.parse)
        .into_iter()
        .filter(|b| b.id.is_some() && b.is_redirect())
        .map(|b| b.label)
        .collect();
    debug!(redirects = redirect_sources.len(), "checking redirect suppression");
    report.push(check_redirects(&scheme, &redirect_sources));

    Ok(report)
}

/// Validates the invariants of a frozen scheme.
pub fn validate_scheme(scheme: &ConceptScheme) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    report.push(check_references(scheme));
    report.push(check_symmetry(scheme));
    report.push(check_top_concepts(scheme));
    report.push(check_self_loops(scheme));
    report.push(summarize_warnings(scheme));
    report
}

fn check_references(scheme: &ConceptScheme) -> TestResult {
    let mut dangling = Vec::new();
    for concept in scheme.concepts() {
        for (name, ids) in edges(concept) {
            for id in ids.iter().filter(|id| scheme.get(id).is_none()) {
                dangling.push(format!("{} {name} {id}", concept.id));
            }
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        format!("All relations of {} concepts resolve", scheme.concept_count()),
        "Relations naming unknown concepts",
        dangling,
    )
}

fn check_symmetry(scheme: &ConceptScheme) -> TestResult {
    let mut broken = Vec::new();
    for concept in scheme.concepts() {
        for b in &concept.broader {
            if scheme.get(b).is_some_and(|t| !t.narrower.contains(&concept.id)) {
                broken.push(format!("{} broader {b} has no narrower inverse", concept.id));
            }
        }
        for n in &concept.narrower {
            if scheme.get(n).is_some_and(|t| !t.broader.contains(&concept.id)) {
                broken.push(format!("{} narrower {n} has no broader inverse", concept.id));
            }
        }
        for r in &concept.related {
            if scheme.get(r).is_some_and(|t| !t.related.contains(&concept.id)) {
                broken.push(format!("{} related {r} is not reciprocal", concept.id));
            }
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        format!(
            "Hierarchy and association are symmetric ({} broader edges, {} related pairs)",
            scheme.broader_edge_count(),
            scheme.related_pair_count()
        ),
        "Asymmetric relations",
        broken,
    )
}

fn check_top_concepts(scheme: &ConceptScheme) -> TestResult {
    let wrong: Vec<String> = scheme
        .concepts()
        .filter(|c| c.is_top_concept != c.broader.is_empty())
        .map(|c| {
            format!(
                "{}: is_top_concept = {}, {} broader",
                c.id,
                c.is_top_concept,
                c.broader.len()
            )
        })
        .collect();
    TestResult::from_failures(
        VALIDATOR,
        format!(
            "Top concepts are exactly the concepts without broader ({})",
            scheme.top_concept_count()
        ),
        "Top-concept flags disagree with the hierarchy",
        wrong,
    )
}

fn check_self_loops(scheme: &ConceptScheme) -> TestResult {
    let mut loops = Vec::new();
    for concept in scheme.concepts() {
        for (name, ids) in edges(concept) {
            if ids.contains(&concept.id) {
                loops.push(format!("{} {name} itself", concept.id));
            }
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        "No concept relates to itself",
        "Self-referencing relations",
        loops,
    )
}

fn check_redirects(scheme: &ConceptScheme, sources: &[String]) -> TestResult {
    let mut broken = Vec::new();
    for label in sources {
        if scheme.find_by_label(label).is_some() {
            broken.push(format!("redirect source `{label}` has a concept"));
        }
        if !scheme.concepts().any(|c| c.alt_labels.contains(label)) {
            broken.push(format!("redirect source `{label}` is no concept's alternate label"));
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        format!("{} redirect sources folded into alternate labels", sources.len()),
        "Redirect sources not suppressed",
        broken,
    )
}

fn summarize_warnings(scheme: &ConceptScheme) -> TestResult {
    let counts = scheme.warning_counts();
    if counts.is_empty() {
        return TestResult::pass(VALIDATOR, "No extraction warnings");
    }
    let mut details: Vec<String> = counts
        .iter()
        .map(|(kind, n)| format!("{kind}: {n}"))
        .collect();
    let mut examples: BTreeMap<_, Vec<String>> = BTreeMap::new();
    for warning in scheme.warnings() {
        let list = examples.entry(warning.kind).or_default();
        if list.len() < 3 {
            list.push(format!("  {warning}"));
        }
    }
    details.extend(examples.into_values().flatten());
    TestResult::warn_with_details(
        VALIDATOR,
        format!("{} extraction warnings", counts.values().sum::<usize>()),
        details,
    )
}

fn edges(
    concept: &inis_thesaurus::Concept,
) -> [(&'static str, &std::collections::BTreeSet<ConceptId>); 3] {
    [
        ("broader", &concept.broader),
        ("narrower", &concept.narrower),
        ("related", &concept.related),
    ]
}
