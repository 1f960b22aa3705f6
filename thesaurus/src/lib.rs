//! INIS Thesaurus as a typed SKOS concept graph.
//!
//! The `inis-thesaurus` crate turns the text extracted from the INIS
//! Thesaurus into a validated [`ConceptScheme`]: descriptor blocks are
//! segmented and parsed in parallel, relations are resolved across blocks
//! (forward references and `USE`/`SEE` redirections included), hierarchical
//! and associative edges are made symmetric, and top concepts are derived.
//! Serializers produce SKOS JSON-LD and OWL 2 Turtle.
//!
//! # Entry Point
//!
//! ```
//! use inis_thesaurus::{pipeline, ThesaurusConfig};
//!
//! let text = "<bold>NUCLEAR ENGINEERING</bold>\n\
//!             <bold>REACTOR PHYSICS</bold> 1975\n\
//!             BT NUCLEAR ENGINEERING\n";
//! let scheme = pipeline::run(text, &ThesaurusConfig::default()).unwrap();
//! assert_eq!(scheme.concept_count(), 2);
//! assert_eq!(scheme.top_concept_count(), 1);
//! ```
//!
//! # Serialization
//!
//! ```
//! # use inis_thesaurus::{pipeline, ThesaurusConfig};
//! # let scheme = pipeline::run("<bold>A</bold>\n", &ThesaurusConfig::default()).unwrap();
//! let json_ld = inis_thesaurus::serializer::jsonld::to_json_ld(&scheme);
//! let turtle  = inis_thesaurus::serializer::turtle::to_turtle(&scheme);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod parser;
pub mod pipeline;
#[cfg(feature = "serializers")]
pub mod serializer;
pub mod slug;

pub use config::{BoldMarkup, ContinuationMode, ParseConfig, SchemeMetadata, ThesaurusConfig};
pub use error::{Result, ThesaurusError};
pub use model::{
    Concept, ConceptId, ConceptScheme, IntroductionDates, ParseWarning, PendingRelation,
    PipelineStats, RelationKind, ThesaurusDate, WarningKind,
};
