//! JSON-LD 1.1 validator.
//!
//! Verifies that the JSON-LD artifact is a well-formed SKOS document:
//! - Has `@context` with the SKOS, Dublin Core, OWL and `inis` prefixes
//! - Has `@graph` in which every node carries an `@id`
//! - Holds exactly one `skos:ConceptScheme`
//! - Every `@id` reference (`skos:hasTopConcept`, `skos:broader`, ...) names a
//!   node of the graph

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::report::{ConformanceReport, TestResult};
use crate::JSONLD_FILE;

const VALIDATOR: &str = "artifacts/jsonld";

/// Required namespace prefixes in the JSON-LD context.
const REQUIRED_PREFIXES: &[&str] = &["skos", "inis", "xsd", "dct", "owl", "rdf", "rdfs"];

/// Concept properties whose values are `@id` references.
const REFERENCE_PROPERTIES: &[&str] = &["skos:broader", "skos:narrower", "skos:related"];

/// Validates the JSON-LD artifact.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn validate(artifacts: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let json_path = artifacts.join(JSONLD_FILE);
    if !json_path.exists() {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("{JSONLD_FILE} not found"),
        ));
        return Ok(report);
    }

    let content = std::fs::read_to_string(&json_path)
        .with_context(|| format!("Failed to read {}", json_path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", json_path.display()))?;

    report.extend(validate_value(&value));
    Ok(report)
}

/// Runs every structural check on an already parsed document.
pub fn validate_value(value: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    check_context(value, &mut report);
    if let Some(graph) = check_graph_structure(value, &mut report) {
        check_scheme(graph, &mut report);
        check_id_resolution(graph, &mut report);
    }
    report
}

/// Verifies that the `@context` contains all required prefixes.
fn check_context(value: &Value, report: &mut ConformanceReport) {
    let Some(context) = value.get("@context") else {
        report.push(TestResult::fail(VALIDATOR, "JSON-LD document missing @context"));
        return;
    };

    let missing: Vec<String> = REQUIRED_PREFIXES
        .iter()
        .filter(|prefix| context.get(**prefix).and_then(Value::as_str).is_none())
        .map(|prefix| (*prefix).to_owned())
        .collect();

    if missing.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            "All required namespace prefixes present in @context",
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Missing prefixes in @context",
            missing,
        ));
    }
}

/// Verifies that `@graph` is an array whose nodes all carry an `@id`.
fn check_graph_structure<'a>(value: &'a Value, report: &mut ConformanceReport) -> Option<&'a [Value]> {
    let Some(graph) = value.get("@graph").and_then(Value::as_array) else {
        report.push(TestResult::fail(VALIDATOR, "JSON-LD document missing @graph array"));
        return None;
    };

    let missing: Vec<String> = graph
        .iter()
        .enumerate()
        .filter(|(_, node)| node.get("@id").and_then(Value::as_str).is_none())
        .map(|(i, _)| format!("node {i} has no @id"))
        .collect();
    report.push(TestResult::from_failures(
        VALIDATOR,
        format!("@graph array present with {} nodes, all identified", graph.len()),
        "@graph nodes without @id",
        missing,
    ));
    Some(graph)
}

/// Verifies that exactly one node is typed `skos:ConceptScheme`.
fn check_scheme(graph: &[Value], report: &mut ConformanceReport) {
    let schemes = graph.iter().filter(|n| has_type(n, "skos:ConceptScheme")).count();
    if schemes == 1 {
        report.push(TestResult::pass(VALIDATOR, "Exactly one skos:ConceptScheme node"));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("Expected one skos:ConceptScheme node, found {schemes}"),
        ));
    }

    let concepts = graph.iter().filter(|n| has_type(n, "skos:Concept")).count();
    if concepts == 0 {
        report.push(TestResult::warn(VALIDATOR, "Concept scheme holds no concepts"));
    } else {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{concepts} skos:Concept nodes"),
        ));
    }
}

/// Verifies that every `@id` reference names a node of the graph.
fn check_id_resolution(graph: &[Value], report: &mut ConformanceReport) {
    let ids: HashSet<&str> = graph
        .iter()
        .filter_map(|n| n.get("@id").and_then(Value::as_str))
        .collect();

    let mut dangling_tops = Vec::new();
    for node in graph.iter().filter(|n| has_type(n, "skos:ConceptScheme")) {
        for target in references(node, "skos:hasTopConcept") {
            if !ids.contains(target) {
                dangling_tops.push(target.to_owned());
            }
        }
    }
    report.push(TestResult::from_failures(
        VALIDATOR,
        "Every skos:hasTopConcept reference names a concept node",
        "skos:hasTopConcept references without a node",
        dangling_tops,
    ));

    let mut dangling = Vec::new();
    for node in graph.iter().filter(|n| has_type(n, "skos:Concept")) {
        let source = node.get("@id").and_then(Value::as_str).unwrap_or("?");
        for property in REFERENCE_PROPERTIES {
            for target in references(node, property) {
                if !ids.contains(target) {
                    dangling.push(format!("{source} {property} {target}"));
                }
            }
        }
    }
    report.push(TestResult::from_failures(
        VALIDATOR,
        "Every concept relation names a concept node",
        "Concept relations without a target node",
        dangling,
    ));
}

fn has_type(node: &Value, ty: &str) -> bool {
    match node.get("@type") {
        Some(Value::String(s)) => s == ty,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(ty)),
        _ => false,
    }
}

/// `@id` values of a property holding one reference or an array of them.
fn references<'a>(node: &'a Value, property: &str) -> Vec<&'a str> {
    match node.get(property) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.get("@id").and_then(Value::as_str))
            .collect(),
        Some(v) => v.get("@id").and_then(Value::as_str).into_iter().collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Value {
        json!({
            "skos": "http://www.w3.org/2004/02/skos/core#",
            "inis": "https://inis.iaea.org/thesaurus/",
            "xsd": "http://www.w3.org/2001/XMLSchema#",
            "dct": "http://purl.org/dc/terms/",
            "owl": "http://www.w3.org/2002/07/owl#",
            "rdf": "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
            "rdfs": "http://www.w3.org/2000/01/rdf-schema#"
        })
    }

    #[test]
    fn minimal_document_passes() {
        let doc = json!({
            "@context": context(),
            "@graph": [
                { "@id": "inis:scheme", "@type": "skos:ConceptScheme",
                  "skos:hasTopConcept": [{ "@id": "inis:a" }] },
                { "@id": "inis:a", "@type": "skos:Concept", "skos:narrower": [{ "@id": "inis:b" }] },
                { "@id": "inis:b", "@type": "skos:Concept", "skos:broader": [{ "@id": "inis:a" }] }
            ]
        });
        let report = validate_value(&doc);
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn dangling_top_concept_fails() {
        let doc = json!({
            "@context": context(),
            "@graph": [
                { "@id": "inis:scheme", "@type": "skos:ConceptScheme",
                  "skos:hasTopConcept": [{ "@id": "inis:ghost" }] },
                { "@id": "inis:a", "@type": "skos:Concept" }
            ]
        });
        let report = validate_value(&doc);
        assert_eq!(report.failure_count(), 1);
        let failure = report.results.iter().find(|r| r.is_failure()).unwrap();
        assert_eq!(failure.details, vec!["inis:ghost".to_owned()]);
    }

    #[test]
    fn missing_prefix_and_id_fail() {
        let doc = json!({
            "@context": { "skos": "http://www.w3.org/2004/02/skos/core#" },
            "@graph": [
                { "@type": "skos:ConceptScheme" },
                { "@id": "inis:scheme2", "@type": "skos:ConceptScheme" }
            ]
        });
        let report = validate_value(&doc);
        // prefixes, @id, scheme count
        assert_eq!(report.failure_count(), 3);
    }
}
