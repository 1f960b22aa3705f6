//! Turtle 1.1 validator.
//!
//! Parses the OWL/Turtle artifact with `sophia_turtle` and checks:
//! - The prefix block declares the SKOS, OWL, Dublin Core and `inis` prefixes
//! - The document parses and yields at least one triple
//! - `skos:broader` and `skos:narrower` triples pair up
//! - The number of `skos:Concept` individuals matches the JSON-LD artifact

use std::path::Path;

use anyhow::{Context, Result};
use inis_thesaurus::model::iris;
use sophia_api::source::TripleSource;
use sophia_api::term::Term;
use sophia_api::triple::Triple;

use crate::report::{ConformanceReport, TestResult};
use crate::{JSONLD_FILE, TURTLE_FILE};

const VALIDATOR: &str = "artifacts/turtle";

/// Prefixes every artifact must declare.
const REQUIRED_PREFIXES: &[&str] = &["skos", "owl", "rdf", "rdfs", "xsd", "dct", "inis"];

/// Triple counts gathered while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripleCounts {
    /// All triples.
    pub triples: usize,
    /// Subjects typed `skos:Concept`.
    pub concepts: usize,
    /// `skos:broader` triples.
    pub broader: usize,
    /// `skos:narrower` triples.
    pub narrower: usize,
    /// `skos:related` triples.
    pub related: usize,
}

/// Parses `content` as Turtle and counts the SKOS triples of interest.
///
/// # Errors
///
/// Returns the parser's message if `content` is not valid Turtle 1.1.
pub fn count_triples(content: &str) -> std::result::Result<TripleCounts, String> {
    let rdf_type = format!("{}type", iris::RDF);
    let skos_concept = format!("{}Concept", iris::SKOS);
    let broader = format!("{}broader", iris::SKOS);
    let narrower = format!("{}narrower", iris::SKOS);
    let related = format!("{}related", iris::SKOS);

    let mut counts = TripleCounts::default();
    let mut source = sophia_turtle::parser::turtle::parse_str(content);
    source
        .for_each_triple(|t| {
            counts.triples += 1;
            let p = t.p();
            let Some(predicate) = p.iri() else {
                return;
            };
            let predicate = predicate.as_str();
            if predicate == rdf_type {
                if t.o().iri().is_some_and(|o| o.as_str() == skos_concept) {
                    counts.concepts += 1;
                }
            } else if predicate == broader {
                counts.broader += 1;
            } else if predicate == narrower {
                counts.narrower += 1;
            } else if predicate == related {
                counts.related += 1;
            }
        })
        .map_err(|e| e.to_string())?;
    Ok(counts)
}

/// Validates the Turtle artifact.
///
/// # Errors
///
/// Returns an error if an artifact file cannot be read.
pub fn validate(artifacts: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let ttl_path = artifacts.join(TURTLE_FILE);
    if !ttl_path.exists() {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("{TURTLE_FILE} not found in artifacts directory"),
        ));
        return Ok(report);
    }

    let content = std::fs::read_to_string(&ttl_path)
        .with_context(|| format!("Failed to read {}", ttl_path.display()))?;

    check_prefixes(&content, &mut report);

    let counts = match count_triples(&content) {
        Ok(counts) => counts,
        Err(message) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{TURTLE_FILE} is not valid Turtle 1.1"),
                vec![message],
            ));
            return Ok(report);
        }
    };

    if counts.triples > 0 {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "{TURTLE_FILE} parses as Turtle 1.1 ({} triples, {} concepts)",
                counts.triples, counts.concepts
            ),
        ));
    } else {
        report.push(TestResult::fail(VALIDATOR, format!("{TURTLE_FILE} holds no triples")));
    }

    if counts.broader == counts.narrower {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{} skos:broader triples, each with its skos:narrower inverse", counts.broader),
        ));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!(
                "skos:broader ({}) and skos:narrower ({}) triple counts differ",
                counts.broader, counts.narrower
            ),
        ));
    }
    if counts.related % 2 != 0 {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("odd number of skos:related triples ({})", counts.related),
        ));
    }

    check_against_jsonld(artifacts, counts, &mut report)?;
    Ok(report)
}

fn check_prefixes(content: &str, report: &mut ConformanceReport) {
    let declared: Vec<&str> = content
        .lines()
        .filter_map(|l| l.trim_start().strip_prefix("@prefix"))
        .filter_map(|rest| rest.trim_start().split(':').next())
        .collect();
    let missing: Vec<String> = REQUIRED_PREFIXES
        .iter()
        .filter(|p| !declared.contains(*p))
        .map(|p| format!("@prefix {p}: missing"))
        .collect();
    report.push(TestResult::from_failures(
        VALIDATOR,
        format!("Turtle file declares all {} required prefixes", REQUIRED_PREFIXES.len()),
        "Turtle file is missing prefix declarations",
        missing,
    ));
}

/// Cross-checks the concept count with the JSON-LD artifact, when present.
fn check_against_jsonld(
    artifacts: &Path,
    counts: TripleCounts,
    report: &mut ConformanceReport,
) -> Result<()> {
    let json_path = artifacts.join(JSONLD_FILE);
    if !json_path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(&json_path)
        .with_context(|| format!("Failed to read {}", json_path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", json_path.display()))?;
    let json_concepts = value
        .get("@graph")
        .and_then(serde_json::Value::as_array)
        .map_or(0, |graph| {
            graph
                .iter()
                .filter(|n| n.get("@type").and_then(serde_json::Value::as_str) == Some("skos:Concept"))
                .count()
        });
    if json_concepts == counts.concepts {
        report.push(TestResult::pass(
            VALIDATOR,
            "Turtle and JSON-LD artifacts hold the same concepts",
        ));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!(
                "Turtle has {} concepts, JSON-LD has {json_concepts}",
                counts.concepts
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inis_thesaurus::serializer::turtle::to_turtle;
    use inis_thesaurus::{pipeline, ThesaurusConfig};

    use crate::fixtures::SAMPLE_THESAURUS;

    #[test]
    fn serialized_sample_parses() {
        let scheme = pipeline::run(SAMPLE_THESAURUS, &ThesaurusConfig::default()).unwrap();
        let counts = count_triples(&to_turtle(&scheme)).unwrap();
        assert_eq!(counts.concepts, scheme.concept_count());
        assert_eq!(counts.broader, scheme.broader_edge_count());
        assert_eq!(counts.broader, counts.narrower);
        assert_eq!(counts.related, 2 * scheme.related_pair_count());
    }

    #[test]
    fn invalid_turtle_is_reported() {
        assert!(count_triples("@prefix ex: <http://example.org/> .\nex:a ex:b").is_err());
    }

    #[test]
    fn missing_prefixes_are_listed() {
        let mut report = ConformanceReport::new();
        check_prefixes("@prefix skos: <http://www.w3.org/2004/02/skos/core#> .\n", &mut report);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results[0].details.len(), REQUIRED_PREFIXES.len() - 1);
    }
}
