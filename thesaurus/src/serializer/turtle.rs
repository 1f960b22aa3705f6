//! Turtle 1.1 serializer producing an OWL 2 DL ontology.
//!
//! The scheme and every concept are written as `owl:NamedIndividual`s typed
//! with their SKOS class; SKOS itself is imported. The two introduction-date
//! properties are declared as annotation properties.

use crate::model::{iris, Concept, ConceptId, ConceptScheme, ThesaurusDate};
use crate::serializer::SCHEME_CURIE;

/// Serializes the concept scheme to a Turtle string.
#[must_use]
pub fn to_turtle(scheme: &ConceptScheme) -> String {
    let meta = scheme.metadata();
    let base = meta.base_iri.as_str();
    let lang = meta.language.as_deref();
    let mut out = String::with_capacity(512 * (scheme.concept_count() + 1));

    // Prefix declarations
    out.push_str(&format!("@prefix skos: <{}> .\n", iris::SKOS));
    out.push_str(&format!("@prefix owl:  <{}> .\n", iris::OWL));
    out.push_str(&format!("@prefix rdf:  <{}> .\n", iris::RDF));
    out.push_str(&format!("@prefix rdfs: <{}> .\n", iris::RDFS));
    out.push_str(&format!("@prefix xsd:  <{}> .\n", iris::XSD));
    out.push_str(&format!("@prefix dct:  <{}> .\n", iris::DCT));
    out.push_str(&format!("@prefix inis: <{}> .\n\n", base));

    // Ontology header
    out.push_str(&format!(
        "<{}>\n  a owl:Ontology ;\n  rdfs:label {} ;\n  owl:imports <{}> .\n\n",
        base.trim_end_matches(['/', '#']),
        literal(&meta.title, None),
        iris::SKOS_ONTOLOGY
    ));

    // Annotation properties
    for (local, label) in [
        ("introducedINIS", "introduced in INIS"),
        ("introducedETDE", "introduced in ETDE"),
    ] {
        out.push_str(&format!(
            "inis:{local}\n  a owl:AnnotationProperty ;\n  rdfs:label {} .\n\n",
            literal(label, None)
        ));
    }

    // Concept scheme
    let mut clauses = vec![
        "a owl:NamedIndividual , skos:ConceptScheme".to_owned(),
        format!("dct:title {}", literal(&meta.title, lang)),
    ];
    if let Some(issued) = &meta.issued {
        clauses.push(format!("dct:issued {}", literal(issued, None)));
    }
    if let Some(publisher) = &meta.publisher {
        clauses.push(format!("dct:publisher {}", literal(publisher, None)));
    }
    let tops: Vec<String> = scheme
        .top_concepts()
        .map(|c| concept_ref(base, &c.id))
        .collect();
    if !tops.is_empty() {
        clauses.push(format!("skos:hasTopConcept {}", tops.join(" , ")));
    }
    push_subject(&mut out, SCHEME_CURIE, &clauses);

    out.push_str("# Concepts\n\n");
    for concept in scheme.concepts() {
        let clauses = concept_clauses(concept, base, lang);
        push_subject(&mut out, &concept_ref(base, &concept.id), &clauses);
    }

    out
}

fn concept_clauses(concept: &Concept, base: &str, lang: Option<&str>) -> Vec<String> {
    let mut clauses = vec![
        "a owl:NamedIndividual , skos:Concept".to_owned(),
        format!("skos:inScheme {SCHEME_CURIE}"),
        format!("skos:prefLabel {}", literal(&concept.pref_label, lang)),
    ];
    if !concept.alt_labels.is_empty() {
        let labels: Vec<String> = concept.alt_labels.iter().map(|l| literal(l, lang)).collect();
        clauses.push(format!("skos:altLabel {}", labels.join(" , ")));
    }
    if let Some(definition) = &concept.definition {
        clauses.push(format!("skos:definition {}", literal(definition, lang)));
    }
    if !concept.history_notes.is_empty() {
        let notes: Vec<String> = concept.history_notes.iter().map(|n| literal(n, lang)).collect();
        clauses.push(format!("skos:historyNote {}", notes.join(" , ")));
    }
    for (predicate, ids) in [
        ("skos:broader", &concept.broader),
        ("skos:narrower", &concept.narrower),
        ("skos:related", &concept.related),
    ] {
        if !ids.is_empty() {
            let refs: Vec<String> = ids.iter().map(|id| concept_ref(base, id)).collect();
            clauses.push(format!("{predicate} {}", refs.join(" , ")));
        }
    }
    if concept.is_top_concept {
        clauses.push(format!("skos:topConceptOf {SCHEME_CURIE}"));
    }
    if let Some(date) = &concept.introduced.inis {
        clauses.push(format!("inis:introducedINIS {}", date_literal(date)));
    }
    if let Some(date) = &concept.introduced.etde {
        clauses.push(format!("inis:introducedETDE {}", date_literal(date)));
    }
    clauses
}

fn push_subject(out: &mut String, subject: &str, clauses: &[String]) {
    out.push_str(subject);
    out.push_str("\n  ");
    out.push_str(&clauses.join(" ;\n  "));
    out.push_str(" .\n\n");
}

/// Prefixed name when the id is a plain ASCII local name, full IRI otherwise.
fn concept_ref(base: &str, id: &ConceptId) -> String {
    let id = id.as_str();
    if id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        format!("inis:{id}")
    } else {
        format!("<{base}{id}>")
    }
}

fn literal(s: &str, lang: Option<&str>) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    match lang {
        Some(lang) => format!("\"{escaped}\"@{lang}"),
        None => format!("\"{escaped}\""),
    }
}

fn date_literal(date: &ThesaurusDate) -> String {
    format!("\"{}\"^^{}", date.lexical(), date.xsd_curie())
}
