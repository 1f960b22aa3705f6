//! Symmetry completion.
//!
//! After this pass `B ∈ A.broader ⟺ A ∈ B.narrower` and
//! `B ∈ A.related ⟺ A ∈ B.related` hold for every pair of concepts.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{Concept, ConceptId};

#[derive(Debug, Clone, Copy)]
enum Inverse {
    Broader,
    Narrower,
    Related,
}

/// Adds the inverse of every broader, narrower and related edge.
///
/// Returns the number of edges added; a second call returns 0. Edges pointing
/// at ids missing from `concepts` are left alone.
pub fn complete(concepts: &mut BTreeMap<ConceptId, Concept>) -> usize {
    let mut inverses: Vec<(ConceptId, Inverse, ConceptId)> = Vec::new();
    for concept in concepts.values() {
        for target in &concept.broader {
            inverses.push((target.clone(), Inverse::Narrower, concept.id.clone()));
        }
        for target in &concept.narrower {
            inverses.push((target.clone(), Inverse::Broader, concept.id.clone()));
        }
        for target in &concept.related {
            inverses.push((target.clone(), Inverse::Related, concept.id.clone()));
        }
    }

    let mut added = 0usize;
    for (holder, edge, partner) in inverses {
        let Some(concept) = concepts.get_mut(&holder) else {
            continue;
        };
        let set = match edge {
            Inverse::Broader => &mut concept.broader,
            Inverse::Narrower => &mut concept.narrower,
            Inverse::Related => &mut concept.related,
        };
        if set.insert(partner) {
            added += 1;
        }
    }
    debug!(added, "symmetry completion");
    added
}
