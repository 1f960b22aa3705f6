//! Fatal pipeline errors.
//!
//! Extraction problems are not errors; they are recorded as
//! [`ParseWarning`](crate::model::ParseWarning)s and the run continues.

use thiserror::Error;

use crate::model::RelationKind;

/// A condition that aborts the run before serialization.
#[derive(Debug, Error)]
pub enum ThesaurusError {
    /// Two descriptor blocks derive the same concept id.
    #[error("duplicate concept id `{id}`: labels `{first}` and `{second}`")]
    DuplicateLabel {
        /// The colliding id.
        id: String,
        /// Label of the block that created the concept.
        first: String,
        /// Label of the later block.
        second: String,
    },

    /// A relation target never resolved to a concept.
    #[error("unresolved {kind} reference from `{source_label}` to `{target}`")]
    UnresolvedReference {
        /// Label of the block holding the relation.
        source_label: String,
        /// Relation kind.
        kind: RelationKind,
        /// Target label text.
        target: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Crate result alias.
pub type Result<T, E = ThesaurusError> = std::result::Result<T, E>;
