//! Whole-graph resolution (phase 2).
//!
//! Phase boundaries are carried by types:
//! [`GraphBuilder`] accepts extracted blocks and resolves references,
//! [`ConceptGraph`] is the resolved graph on which symmetry completion and
//! top-concept derivation run, and [`ConceptGraph::freeze`] hands out the
//! read-only [`ConceptScheme`].

pub mod builder;
pub mod redirect;
pub mod symmetry;
pub mod top;

use std::collections::{BTreeMap, HashMap};

use crate::config::SchemeMetadata;
use crate::error::{Result, ThesaurusError};
use crate::model::{Concept, ConceptId, ConceptScheme, ParseWarning, PipelineStats};
use crate::slug::{bare_label_key, label_key};

pub use builder::GraphBuilder;
pub use redirect::RedirectIndex;

/// The mutable concept graph of one pipeline run.
#[derive(Debug)]
pub struct ConceptGraph {
    metadata: SchemeMetadata,
    concepts: BTreeMap<ConceptId, Concept>,
    labels: HashMap<String, ConceptId>,
    detached_warnings: Vec<ParseWarning>,
    stats: PipelineStats,
}

impl ConceptGraph {
    /// Creates an empty graph for a scheme.
    #[must_use]
    pub fn new(metadata: SchemeMetadata) -> Self {
        Self {
            metadata,
            concepts: BTreeMap::new(),
            labels: HashMap::new(),
            detached_warnings: Vec::new(),
            stats: PipelineStats::default(),
        }
    }

    /// Adds a concept.
    ///
    /// # Errors
    ///
    /// Returns [`ThesaurusError::DuplicateLabel`] if a concept with the same id
    /// already exists.
    pub fn insert(&mut self, concept: Concept) -> Result<()> {
        if let Some(existing) = self.concepts.get(&concept.id) {
            return Err(ThesaurusError::DuplicateLabel {
                id: concept.id.to_string(),
                first: existing.pref_label.clone(),
                second: concept.pref_label,
            });
        }
        // A full label always wins over another concept's qualifier-free form.
        self.labels
            .insert(label_key(&concept.pref_label), concept.id.clone());
        if let Some(bare) = bare_label_key(&concept.pref_label) {
            self.labels.entry(bare).or_insert_with(|| concept.id.clone());
        }
        self.concepts.insert(concept.id.clone(), concept);
        Ok(())
    }

    /// Finds the id of the concept whose preferred label matches `label`.
    ///
    /// Matching ignores case, spacing and punctuation, and a label also matches
    /// with its parenthetical qualifiers left out.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<&ConceptId> {
        self.labels
            .get(&label_key(label))
            .or_else(|| self.labels.get(&bare_label_key(label)?))
    }

    /// Returns a concept by id.
    #[must_use]
    pub fn get(&self, id: &ConceptId) -> Option<&Concept> {
        self.concepts.get(id)
    }

    /// Returns a concept by id for modification.
    pub fn get_mut(&mut self, id: &ConceptId) -> Option<&mut Concept> {
        self.concepts.get_mut(id)
    }

    /// Iterates concepts in id order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Returns the number of concepts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns true if the graph has no concepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Records a warning for a block that produced no concept.
    pub fn push_detached_warning(&mut self, warning: ParseWarning) {
        self.detached_warnings.push(warning);
    }

    /// Mutable access to the run counters.
    pub fn stats_mut(&mut self) -> &mut PipelineStats {
        &mut self.stats
    }

    /// Materializes inverse edges. Returns the number of edges added.
    pub fn complete_symmetry(&mut self) -> usize {
        let added = symmetry::complete(&mut self.concepts);
        self.stats.symmetric_edges_added += added;
        added
    }

    /// Recomputes `is_top_concept` for every concept. Returns the top-concept count.
    pub fn derive_top_concepts(&mut self) -> usize {
        top::derive(&mut self.concepts)
    }

    /// Ends the run and returns the read-only scheme.
    #[must_use]
    pub fn freeze(self) -> ConceptScheme {
        ConceptScheme::from_parts(
            self.metadata,
            self.concepts,
            self.detached_warnings,
            self.stats,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::concept_id;

    fn concept(label: &str) -> Concept {
        Concept::new(concept_id(label).unwrap(), label.to_owned())
    }

    #[test]
    fn lookup_ignores_case_and_spacing() {
        let mut graph = ConceptGraph::new(SchemeMetadata::default());
        graph.insert(concept("Nuclear fission")).unwrap();
        let id = graph.lookup("NUCLEAR   FISSION").unwrap();
        assert_eq!(id.as_str(), "nuclear-fission");
        assert!(graph.lookup("fission").is_none());
    }

    #[test]
    fn lookup_matches_labels_without_their_qualifier() {
        let mut graph = ConceptGraph::new(SchemeMetadata::default());
        graph.insert(concept("MIXED OXIDE FUELS (MOX)")).unwrap();
        let id = graph.lookup("Mixed oxide fuels").unwrap();
        assert_eq!(id.as_str(), "mixed-oxide-fuels-mox");
        assert_eq!(graph.lookup("MIXED OXIDE FUELS (MOX)"), Some(id));

        graph.insert(concept("MIXED OXIDE FUELS")).unwrap();
        let id = graph.lookup("MIXED OXIDE FUELS").unwrap();
        assert_eq!(id.as_str(), "mixed-oxide-fuels");
    }

    #[test]
    fn colliding_ids_are_duplicates() {
        let mut graph = ConceptGraph::new(SchemeMetadata::default());
        graph.insert(concept("U-235")).unwrap();
        let err = graph.insert(concept("U 235")).unwrap_err();
        match err {
            ThesaurusError::DuplicateLabel { id, first, second } => {
                assert_eq!(id, "u-235");
                assert_eq!(first, "U-235");
                assert_eq!(second, "U 235");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
