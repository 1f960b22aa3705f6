//! End-to-end transformation of a thesaurus document into a [`ConceptScheme`].

use tracing::{debug, info, warn};

use crate::config::ThesaurusConfig;
use crate::error::Result;
use crate::graph::GraphBuilder;
use crate::model::ConceptScheme;
use crate::parser::extract_all;

/// Runs the full pipeline over `text`.
///
/// Phase 1 extracts every block in parallel. Phase 2 starts once phase 1 has
/// finished for all blocks: it builds the graph, resolves forward references
/// and redirects, completes symmetry, derives top concepts and freezes the
/// scheme.
///
/// # Errors
///
/// Returns [`crate::ThesaurusError::DuplicateLabel`] or
/// [`crate::ThesaurusError::UnresolvedReference`]; no partial scheme is produced.
pub fn run(text: &str, config: &ThesaurusConfig) -> Result<ConceptScheme> {
    let blocks = extract_all(text, &config.parse);
    debug!(blocks = blocks.len(), "extracted descriptor blocks");
    for warning in blocks.iter().flat_map(|b| b.warnings.iter()) {
        warn!(label = %warning.label, kind = %warning.kind, "{}", warning.message);
    }

    let mut builder = GraphBuilder::for_blocks(config.scheme.clone(), &blocks);
    for block in blocks {
        builder.add_block(block)?;
    }
    debug!(pending = builder.pending_len(), "all blocks added");

    let mut graph = builder.finish()?;
    let added = graph.complete_symmetry();
    let tops = graph.derive_top_concepts();
    let scheme = graph.freeze();

    info!(
        concepts = scheme.concept_count(),
        top_concepts = tops,
        symmetric_edges_added = added,
        warnings = scheme.warnings().count(),
        "concept scheme built"
    );
    Ok(scheme)
}
