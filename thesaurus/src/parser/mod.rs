//! Per-block extraction (phase 1).
//!
//! Each block is parsed independently of every other block:
//! [`segment`] finds the blocks, [`fields`] pulls out dates, definition and
//! history notes, and [`relations`] reads the relationship lines.
//! [`extract_all`] fans the blocks out over the rayon pool and returns the
//! results in document order.

pub mod fields;
pub mod relations;
pub mod segment;

use rayon::prelude::*;

use crate::config::ParseConfig;
use crate::model::{
    ConceptId, IntroductionDates, ParseWarning, PendingRelation, RelationKind, WarningKind,
};
use crate::slug::concept_id;

pub use segment::{RawBlock, Segmenter};

/// Everything extracted from one descriptor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    /// Position of the block in the document.
    pub ordinal: usize,
    /// One-based line number of the label line.
    pub line: usize,
    /// Descriptor label.
    pub label: String,
    /// Id derived from the label; `None` when the label has no alphanumerics.
    pub id: Option<ConceptId>,
    /// INIS / ETDE introduction dates.
    pub dates: IntroductionDates,
    /// Definition text.
    pub definition: Option<String>,
    /// Parenthetical notes in document order.
    pub history_notes: Vec<String>,
    /// Relations in document order.
    pub relations: Vec<PendingRelation>,
    /// Extraction warnings.
    pub warnings: Vec<ParseWarning>,
}

impl ExtractedBlock {
    /// True when the block carries a `USE`/`SEE` relation.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.relations
            .iter()
            .any(|r| r.kind == RelationKind::Redirect)
    }
}

/// Extracts fields and relations from one raw block.
#[must_use]
pub fn extract_block(raw: &RawBlock<'_>, config: &ParseConfig) -> ExtractedBlock {
    let mut lines = Vec::with_capacity(raw.body.len() + 1);
    lines.push(segment::strip_markup(raw.header_rest, &config.bold));
    lines.extend(
        raw.body
            .iter()
            .map(|l| segment::strip_markup(l, &config.bold)),
    );

    let extracted = fields::extract_fields(&lines);
    let parsed = relations::parse_relations(&extracted.relation_lines, config.continuation);

    let mut warnings: Vec<ParseWarning> = extracted
        .warnings
        .into_iter()
        .map(|(kind, msg)| ParseWarning::new(&raw.label, kind, msg))
        .collect();
    warnings.extend(
        parsed
            .problems
            .into_iter()
            .map(|msg| ParseWarning::new(&raw.label, WarningKind::MalformedBlock, msg)),
    );

    let id = concept_id(&raw.label);
    if id.is_none() {
        warnings.push(ParseWarning::new(
            &raw.label,
            WarningKind::MalformedBlock,
            format!("label on line {} has no alphanumeric characters", raw.line),
        ));
    }

    let relations = match &id {
        Some(source) => parsed
            .relations
            .into_iter()
            .map(|(kind, target)| PendingRelation {
                source: source.clone(),
                source_label: raw.label.clone(),
                kind,
                target,
                block: raw.ordinal,
            })
            .collect(),
        None => Vec::new(),
    };

    ExtractedBlock {
        ordinal: raw.ordinal,
        line: raw.line,
        label: raw.label.clone(),
        id,
        dates: extracted.dates,
        definition: extracted.definition,
        history_notes: extracted.history_notes,
        relations,
        warnings,
    }
}

/// Segments `text` and extracts every block in parallel.
///
/// The returned blocks are in document order regardless of scheduling.
#[must_use]
pub fn extract_all(text: &str, config: &ParseConfig) -> Vec<ExtractedBlock> {
    let raw: Vec<RawBlock<'_>> = Segmenter::new(text, &config.bold).collect();
    raw.par_iter()
        .map(|block| extract_block(block, config))
        .collect()
}
