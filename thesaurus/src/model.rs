//! Core thesaurus model types.
//!
//! A [`ConceptScheme`] owns every [`Concept`] in a `BTreeMap` keyed by
//! [`ConceptId`]. Hierarchical and associative edges are stored as ids, so a
//! concept never owns its relation partners; all lookups go through the scheme.
//! The scheme is produced by [`crate::graph::ConceptGraph::freeze`] and is
//! read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SchemeMetadata;

/// Stable identifier of a concept, derived from its preferred label.
///
/// See [`crate::slug::concept_id`] for the derivation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ConceptId(String);

impl ConceptId {
    pub(crate) fn new(slug: String) -> Self {
        Self(slug)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConceptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The kind of a relationship line after code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RelationKind {
    /// `UF` / `SF`: the target text is an alternate label of the source.
    AltLabel,
    /// `BT`: the target is broader than the source.
    Broader,
    /// `NT`: the target is narrower than the source.
    Narrower,
    /// `RT`: associative relation.
    Related,
    /// `USE` / `SEE`: the source is a non-preferred term for the target.
    Redirect,
}

impl RelationKind {
    /// Returns the name used in diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::AltLabel => "AltLabel",
            RelationKind::Broader => "Broader",
            RelationKind::Narrower => "Narrower",
            RelationKind::Related => "Related",
            RelationKind::Redirect => "Redirect",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relation as read from a block, before its target is known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRelation {
    /// Id derived from the source block label.
    pub source: ConceptId,
    /// The source block label as written.
    pub source_label: String,
    /// Relation kind.
    pub kind: RelationKind,
    /// Target label text as written (continuations joined per parse config).
    pub target: String,
    /// Position of the source block in the document.
    pub block: usize,
}

/// The introduction date of a descriptor, at whatever precision the source gives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThesaurusDate {
    /// A bare year, e.g. `1975`.
    Year(i32),
    /// A year and month, e.g. `1998-04`.
    YearMonth(i32, u32),
    /// A full calendar day.
    Day(NaiveDate),
}

impl ThesaurusDate {
    /// Returns the XSD lexical form.
    #[must_use]
    pub fn lexical(&self) -> String {
        match self {
            ThesaurusDate::Year(y) => format!("{y:04}"),
            ThesaurusDate::YearMonth(y, m) => format!("{y:04}-{m:02}"),
            ThesaurusDate::Day(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Returns the full IRI of the XSD datatype matching the precision.
    #[must_use]
    pub fn xsd_datatype(&self) -> &'static str {
        match self {
            ThesaurusDate::Year(_) => iris::XSD_GYEAR,
            ThesaurusDate::YearMonth(..) => iris::XSD_GYEARMONTH,
            ThesaurusDate::Day(_) => iris::XSD_DATE,
        }
    }

    /// Returns the prefixed (`xsd:`) form of the datatype.
    #[must_use]
    pub fn xsd_curie(&self) -> &'static str {
        match self {
            ThesaurusDate::Year(_) => "xsd:gYear",
            ThesaurusDate::YearMonth(..) => "xsd:gYearMonth",
            ThesaurusDate::Day(_) => "xsd:date",
        }
    }
}

impl fmt::Display for ThesaurusDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical())
    }
}

/// INIS / ETDE introduction dates. Both unset means "before 1975".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntroductionDates {
    /// Date the descriptor entered the INIS thesaurus.
    pub inis: Option<ThesaurusDate>,
    /// Date the descriptor entered the ETDE thesaurus.
    pub etde: Option<ThesaurusDate>,
}

/// Non-fatal extraction problem classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningKind {
    /// Unparseable date, relationship or parenthetical syntax.
    MalformedBlock,
    /// Date token count outside {0, 1, 2 labeled}.
    AmbiguousDateFormat,
}

impl WarningKind {
    /// Returns the name used in summaries.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::MalformedBlock => "MalformedBlock",
            WarningKind::AmbiguousDateFormat => "AmbiguousDateFormat",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warning recorded against a descriptor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Label of the offending block.
    pub label: String,
    /// Warning class.
    pub kind: WarningKind,
    /// Human-readable detail.
    pub message: String,
}

impl ParseWarning {
    pub(crate) fn new(label: &str, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            label: label.to_owned(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.label, self.message)
    }
}

/// One thesaurus descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    /// Identifier derived from `pref_label`.
    pub id: ConceptId,
    /// Preferred label.
    pub pref_label: String,
    /// Synonyms and redirected terms.
    pub alt_labels: BTreeSet<String>,
    /// Free text preceding the first relationship line.
    pub definition: Option<String>,
    /// Parenthetical notes in order of appearance.
    pub history_notes: Vec<String>,
    /// INIS / ETDE introduction dates.
    pub introduced: IntroductionDates,
    /// Ids of broader concepts.
    pub broader: BTreeSet<ConceptId>,
    /// Ids of narrower concepts.
    pub narrower: BTreeSet<ConceptId>,
    /// Ids of related concepts.
    pub related: BTreeSet<ConceptId>,
    /// True when `broader` is empty once the graph is complete.
    pub is_top_concept: bool,
    /// Extraction warnings for this descriptor.
    pub warnings: Vec<ParseWarning>,
}

impl Concept {
    pub(crate) fn new(id: ConceptId, pref_label: String) -> Self {
        Self {
            id,
            pref_label,
            alt_labels: BTreeSet::new(),
            definition: None,
            history_notes: Vec::new(),
            introduced: IntroductionDates::default(),
            broader: BTreeSet::new(),
            narrower: BTreeSet::new(),
            related: BTreeSet::new(),
            is_top_concept: false,
            warnings: Vec::new(),
        }
    }
}

/// Counters gathered while building the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Descriptor blocks seen by the segmenter.
    pub blocks: usize,
    /// Blocks whose label is a redirect source.
    pub redirect_blocks: usize,
    /// Redirect relations turned into alternate labels.
    pub redirects_applied: usize,
    /// Relations that were forward references when first seen.
    pub forward_references: usize,
    /// Edges added by symmetry completion.
    pub symmetric_edges_added: usize,
}

/// The frozen concept scheme: metadata plus the complete concept set.
#[derive(Debug, Clone)]
pub struct ConceptScheme {
    metadata: SchemeMetadata,
    concepts: BTreeMap<ConceptId, Concept>,
    detached_warnings: Vec<ParseWarning>,
    stats: PipelineStats,
}

impl ConceptScheme {
    pub(crate) fn from_parts(
        metadata: SchemeMetadata,
        concepts: BTreeMap<ConceptId, Concept>,
        detached_warnings: Vec<ParseWarning>,
        stats: PipelineStats,
    ) -> Self {
        Self {
            metadata,
            concepts,
            detached_warnings,
            stats,
        }
    }

    /// Scheme-level metadata.
    #[must_use]
    pub fn metadata(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Iterates all concepts in id order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Looks up a concept by id. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, id: &ConceptId) -> Option<&Concept> {
        self.concepts.get(id)
    }

    /// Looks up a concept by the id derived from `label`.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&Concept> {
        crate::slug::concept_id(label).and_then(|id| self.concepts.get(&id))
    }

    /// Iterates top concepts in id order.
    pub fn top_concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values().filter(|c| c.is_top_concept)
    }

    /// Returns the number of concepts.
    #[must_use]
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Returns the number of top concepts.
    #[must_use]
    pub fn top_concept_count(&self) -> usize {
        self.top_concepts().count()
    }

    /// Returns the total number of alternate labels.
    #[must_use]
    pub fn alt_label_count(&self) -> usize {
        self.concepts.values().map(|c| c.alt_labels.len()).sum()
    }

    /// Returns the number of broader edges (equal to the number of narrower edges).
    #[must_use]
    pub fn broader_edge_count(&self) -> usize {
        self.concepts.values().map(|c| c.broader.len()).sum()
    }

    /// Returns the number of undirected related pairs.
    #[must_use]
    pub fn related_pair_count(&self) -> usize {
        self.concepts.values().map(|c| c.related.len()).sum::<usize>() / 2
    }

    /// Iterates every warning: per-concept warnings first, then warnings from
    /// blocks that produced no concept.
    pub fn warnings(&self) -> impl Iterator<Item = &ParseWarning> {
        self.concepts
            .values()
            .flat_map(|c| c.warnings.iter())
            .chain(self.detached_warnings.iter())
    }

    /// Returns warning counts grouped by kind.
    #[must_use]
    pub fn warning_counts(&self) -> BTreeMap<WarningKind, usize> {
        let mut counts = BTreeMap::new();
        for warning in self.warnings() {
            *counts.entry(warning.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Counters gathered while building.
    #[must_use]
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}

/// Standard IRI constants used by the serializers.
pub mod iris {
    /// SKOS core namespace.
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
    /// SKOS core ontology document.
    pub const SKOS_ONTOLOGY: &str = "http://www.w3.org/2004/02/skos/core";
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// Dublin Core terms namespace.
    pub const DCT: &str = "http://purl.org/dc/terms/";

    /// `xsd:date`.
    pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    /// `xsd:gYear`.
    pub const XSD_GYEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";
    /// `xsd:gYearMonth`.
    pub const XSD_GYEARMONTH: &str = "http://www.w3.org/2001/XMLSchema#gYearMonth";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_lexical_forms_match_precision() {
        let day = NaiveDate::from_ymd_opt(1998, 4, 12).map(ThesaurusDate::Day);
        assert_eq!(day.map(|d| d.lexical()).as_deref(), Some("1998-04-12"));
        assert_eq!(ThesaurusDate::Year(1975).lexical(), "1975");
        assert_eq!(ThesaurusDate::YearMonth(2001, 3).lexical(), "2001-03");
        assert_eq!(ThesaurusDate::Year(1975).xsd_curie(), "xsd:gYear");
    }

    #[test]
    fn warning_display_names_kind_and_label() {
        let w = ParseWarning::new("Fission", WarningKind::AmbiguousDateFormat, "3 dates");
        assert_eq!(w.to_string(), "[AmbiguousDateFormat] Fission: 3 dates");
    }
}
