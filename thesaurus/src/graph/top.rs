//! Top-concept derivation.

use std::collections::BTreeMap;

use crate::model::{Concept, ConceptId};

/// Sets `is_top_concept` to `broader.is_empty()` on every concept and returns
/// the number of top concepts. Run after symmetry completion.
pub fn derive(concepts: &mut BTreeMap<ConceptId, Concept>) -> usize {
    let mut count = 0usize;
    for concept in concepts.values_mut() {
        concept.is_top_concept = concept.broader.is_empty();
        count += usize::from(concept.is_top_concept);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::concept_id;

    #[test]
    fn roots_are_top_concepts() {
        let a = concept_id("A").unwrap();
        let b = concept_id("B").unwrap();
        let mut g = BTreeMap::new();
        let mut child = Concept::new(a.clone(), "A".to_owned());
        child.broader.insert(b.clone());
        child.is_top_concept = true;
        g.insert(a.clone(), child);
        g.insert(b.clone(), Concept::new(b.clone(), "B".to_owned()));

        assert_eq!(derive(&mut g), 1);
        assert!(!g[&a].is_top_concept);
        assert!(g[&b].is_top_concept);
    }
}
