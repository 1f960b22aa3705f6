//! Artifact and graph validators.

pub mod graph;
pub mod jsonld;
pub mod turtle;
