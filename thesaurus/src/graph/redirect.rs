//! USE / SEE redirection.
//!
//! Pass 1 ([`RedirectIndex::collect`]) runs over every extracted block before
//! any concept exists and records which labels are redirect sources. The graph
//! builder consults the index to suppress concepts for those labels. Pass 2
//! ([`RedirectIndex::apply`]) runs once all concepts exist and adds each source
//! label to its target's alternate labels.

use std::collections::{HashMap, HashSet};

use tracing::{debug, error};

use crate::error::{Result, ThesaurusError};
use crate::graph::ConceptGraph;
use crate::model::{ConceptId, PendingRelation, RelationKind};
use crate::parser::ExtractedBlock;
use crate::slug::{bare_label_key, label_key};

/// Redirect relations keyed by the normalized source label.
#[derive(Debug, Default)]
pub struct RedirectIndex {
    by_source: HashMap<String, Vec<PendingRelation>>,
    /// Bare label keys of qualified sources, pointing at their full key.
    bare_sources: HashMap<String, String>,
    source_ids: HashSet<ConceptId>,
}

impl RedirectIndex {
    /// Pass 1: collects every redirect relation in the document.
    #[must_use]
    pub fn collect(blocks: &[ExtractedBlock]) -> Self {
        let mut index = Self::default();
        for relation in blocks
            .iter()
            .flat_map(|b| b.relations.iter())
            .filter(|r| r.kind == RelationKind::Redirect)
        {
            let key = label_key(&relation.source_label);
            if let Some(bare) = bare_label_key(&relation.source_label) {
                index.bare_sources.entry(bare).or_insert_with(|| key.clone());
            }
            index.source_ids.insert(relation.source.clone());
            index.by_source.entry(key).or_default().push(relation.clone());
        }
        debug!(sources = index.by_source.len(), "collected redirect sources");
        index
    }

    /// True when a block with this id and label is the source of a redirect
    /// anywhere in the document. Blocks whose labels derive the same id as a
    /// redirect source (`U 235` and `U-235`) count as that source.
    #[must_use]
    pub fn is_source(&self, id: &ConceptId, label: &str) -> bool {
        self.source_ids.contains(id) || self.by_source.contains_key(&label_key(label))
    }

    /// Returns the number of distinct redirect sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    /// Returns true when the document has no redirects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Resolves `label` to a concept id, following one redirect hop when the
    /// label is a redirect source with a single target.
    #[must_use]
    pub fn resolve<'g>(&self, graph: &'g ConceptGraph, label: &str) -> Option<&'g ConceptId> {
        if let Some(id) = graph.lookup(label) {
            return Some(id);
        }
        let key = label_key(label);
        let relations = self.by_source.get(&key).or_else(|| {
            let full = self.bare_sources.get(&key)?;
            self.by_source.get(full)
        })?;
        match relations.as_slice() {
            [only] => graph.lookup(&only.target),
            _ => None,
        }
    }

    /// Pass 2: adds every redirect source label to its target's alternate
    /// labels. Returns the number of labels added.
    ///
    /// # Errors
    ///
    /// Returns [`ThesaurusError::UnresolvedReference`] for the first redirect
    /// whose target is not a concept; every unresolved redirect is logged.
    pub fn apply(&self, graph: &mut ConceptGraph) -> Result<usize> {
        let mut relations: Vec<&PendingRelation> = self.by_source.values().flatten().collect();
        relations.sort_by_key(|r| r.block);

        let mut unresolved = Vec::new();
        let mut applied = 0usize;
        for relation in relations {
            let Some(target) = self.resolve(graph, &relation.target).cloned() else {
                error!(
                    source = %relation.source_label,
                    target = %relation.target,
                    "redirect target is not a concept"
                );
                unresolved.push(relation);
                continue;
            };
            let Some(concept) = graph.get_mut(&target) else {
                continue;
            };
            if concept.alt_labels.insert(relation.source_label.clone()) {
                applied += 1;
            }
        }

        if let Some(first) = unresolved.first() {
            return Err(ThesaurusError::UnresolvedReference {
                source_label: first.source_label.clone(),
                kind: RelationKind::Redirect,
                target: first.target.clone(),
            });
        }
        graph.stats_mut().redirects_applied += applied;
        Ok(applied)
    }
}
