//! Serializers for the frozen concept scheme.
//!
//! Two serialization formats are supported:
//! - **JSON-LD** ([`jsonld`]): SKOS, output to `public/inis-thesaurus.jsonld`
//! - **Turtle** ([`turtle`]): OWL 2 individuals, output to `public/inis-thesaurus.ttl`

pub mod jsonld;
pub mod turtle;

/// Compact IRI of the concept scheme node.
pub const SCHEME_CURIE: &str = "inis:scheme";

/// Returns the compact IRI (`inis:<id>`) of a concept.
#[must_use]
pub fn concept_curie(id: &crate::model::ConceptId) -> String {
    format!("inis:{id}")
}
