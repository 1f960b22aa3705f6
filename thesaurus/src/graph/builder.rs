//! Concept graph builder.
//!
//! Blocks are fed in document order. Relations whose target is already known
//! are linked immediately; the rest are queued and retried by
//! [`GraphBuilder::finish`] once every block has been seen.

use tracing::{debug, error};

use crate::config::SchemeMetadata;
use crate::error::{Result, ThesaurusError};
use crate::graph::{ConceptGraph, RedirectIndex};
use crate::model::{Concept, ConceptId, ParseWarning, PendingRelation, RelationKind, WarningKind};
use crate::parser::ExtractedBlock;
use crate::slug::label_key;

/// Accumulates concepts and pending relations for one run.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: ConceptGraph,
    redirects: RedirectIndex,
    pending: Vec<PendingRelation>,
}

impl GraphBuilder {
    /// Creates a builder. `redirects` must come from pass 1 over all blocks.
    #[must_use]
    pub fn new(metadata: SchemeMetadata, redirects: RedirectIndex) -> Self {
        Self {
            graph: ConceptGraph::new(metadata),
            redirects,
            pending: Vec::new(),
        }
    }

    /// Convenience constructor running pass 1 over `blocks`.
    #[must_use]
    pub fn for_blocks(metadata: SchemeMetadata, blocks: &[ExtractedBlock]) -> Self {
        Self::new(metadata, RedirectIndex::collect(blocks))
    }

    /// Number of relations waiting for their target.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Adds one block.
    ///
    /// Redirect-source blocks and blocks without a usable label produce no
    /// concept; their warnings are kept at scheme level.
    ///
    /// # Errors
    ///
    /// Returns [`ThesaurusError::DuplicateLabel`] if the block derives the id of
    /// an existing concept.
    pub fn add_block(&mut self, block: ExtractedBlock) -> Result<()> {
        self.graph.stats_mut().blocks += 1;

        let Some(id) = block.id.clone() else {
            for warning in block.warnings {
                self.graph.push_detached_warning(warning);
            }
            return Ok(());
        };

        if self.redirects.is_source(&id, &block.label) {
            self.graph.stats_mut().redirect_blocks += 1;
            let dropped = block
                .relations
                .iter()
                .filter(|r| r.kind != RelationKind::Redirect)
                .count();
            if dropped > 0 {
                debug!(label = %block.label, dropped, "redirect block: other relations discarded");
            }
            for warning in block.warnings {
                self.graph.push_detached_warning(warning);
            }
            return Ok(());
        }

        let mut concept = Concept::new(id, block.label);
        concept.definition = block.definition;
        concept.history_notes = block.history_notes;
        concept.introduced = block.dates;
        concept.warnings = block.warnings;
        self.graph.insert(concept)?;

        for relation in block.relations {
            self.apply(relation);
        }
        Ok(())
    }

    /// Links one relation, or queues it when the target is not known yet.
    fn apply(&mut self, relation: PendingRelation) {
        if relation.kind == RelationKind::AltLabel {
            self.add_alt_label(&relation);
            return;
        }
        match self.redirects.resolve(&self.graph, &relation.target).cloned() {
            Some(target) => self.link(&relation, target),
            None => {
                self.graph.stats_mut().forward_references += 1;
                self.pending.push(relation);
            }
        }
    }

    fn add_alt_label(&mut self, relation: &PendingRelation) {
        let Some(concept) = self.graph.get_mut(&relation.source) else {
            return;
        };
        if label_key(&relation.target) == label_key(&concept.pref_label) {
            concept.warnings.push(ParseWarning::new(
                &relation.source_label,
                WarningKind::MalformedBlock,
                "alternate label equals the preferred label",
            ));
            return;
        }
        concept.alt_labels.insert(relation.target.clone());
    }

    fn link(&mut self, relation: &PendingRelation, target: ConceptId) {
        let Some(concept) = self.graph.get_mut(&relation.source) else {
            return;
        };
        if target == relation.source {
            concept.warnings.push(ParseWarning::new(
                &relation.source_label,
                WarningKind::MalformedBlock,
                format!("{} relation to itself via `{}`", relation.kind, relation.target),
            ));
            return;
        }
        let set = match relation.kind {
            RelationKind::Broader => &mut concept.broader,
            RelationKind::Narrower => &mut concept.narrower,
            RelationKind::Related => &mut concept.related,
            RelationKind::AltLabel | RelationKind::Redirect => return,
        };
        set.insert(target);
    }

    /// Retries queued forward references, applies redirects, and returns the
    /// resolved graph.
    ///
    /// # Errors
    ///
    /// Returns [`ThesaurusError::UnresolvedReference`] for the first relation
    /// or redirect whose target never appeared as a concept. All unresolved
    /// relations are logged before returning.
    pub fn finish(mut self) -> Result<ConceptGraph> {
        let pending = std::mem::take(&mut self.pending);
        debug!(pending = pending.len(), "resolving forward references");

        let mut unresolved = Vec::new();
        for relation in pending {
            match self.redirects.resolve(&self.graph, &relation.target).cloned() {
                Some(target) => self.link(&relation, target),
                None => {
                    error!(
                        source = %relation.source_label,
                        kind = %relation.kind,
                        target = %relation.target,
                        "unresolved reference"
                    );
                    unresolved.push(relation);
                }
            }
        }
        if let Some(first) = unresolved.into_iter().next() {
            return Err(ThesaurusError::UnresolvedReference {
                source_label: first.source_label,
                kind: first.kind,
                target: first.target,
            });
        }

        self.redirects.apply(&mut self.graph)?;
        Ok(self.graph)
    }
}
