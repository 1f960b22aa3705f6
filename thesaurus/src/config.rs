//! Parse rules and scheme metadata.
//!
//! Both structs deserialize from the `[parse]` and `[scheme]` tables of a TOML
//! file; every field has a default so an empty file is valid.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ThesaurusError};

/// How lines following a relationship code line are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContinuationMode {
    /// Continuation lines extend the previous target, joined by one space.
    #[default]
    Joined,
    /// Every continuation line is a separate target under the same code.
    OnePerLine,
}

/// Opening and closing markers of a bold run in the extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoldMarkup {
    /// Opening marker.
    pub open: String,
    /// Closing marker.
    pub close: String,
}

impl Default for BoldMarkup {
    fn default() -> Self {
        Self {
            open: "<bold>".to_owned(),
            close: "</bold>".to_owned(),
        }
    }
}

impl BoldMarkup {
    /// Markdown-style `**label**` markup.
    #[must_use]
    pub fn markdown() -> Self {
        Self {
            open: "**".to_owned(),
            close: "**".to_owned(),
        }
    }
}

/// Rules applied while segmenting and parsing blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Bold markers delimiting descriptor labels.
    pub bold: BoldMarkup,
    /// Continuation rule for relationship targets.
    pub continuation: ContinuationMode,
}

/// Scheme-level metadata carried into the serializations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchemeMetadata {
    /// Namespace IRI for concept and scheme identifiers (bound to `inis:`).
    pub base_iri: String,
    /// Scheme title.
    pub title: String,
    /// Issue date as written in the source edition.
    pub issued: Option<String>,
    /// Publisher name.
    pub publisher: Option<String>,
    /// BCP 47 language tag for labels and notes.
    pub language: Option<String>,
}

impl Default for SchemeMetadata {
    fn default() -> Self {
        Self {
            base_iri: "https://inis.iaea.org/thesaurus/".to_owned(),
            title: "INIS Thesaurus".to_owned(),
            issued: None,
            publisher: None,
            language: Some("en".to_owned()),
        }
    }
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThesaurusConfig {
    /// `[parse]` table.
    pub parse: ParseConfig,
    /// `[scheme]` table.
    pub scheme: SchemeMetadata,
}

impl ThesaurusConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ThesaurusError::Config`] if the text is not valid TOML or does
    /// not match the expected tables.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ThesaurusError::Config(e.to_string()))
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ThesaurusError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ThesaurusError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = ThesaurusConfig::from_toml("").unwrap();
        assert_eq!(config, ThesaurusConfig::default());
        assert_eq!(config.parse.bold.open, "<bold>");
        assert_eq!(config.scheme.language.as_deref(), Some("en"));
    }

    #[test]
    fn tables_override_defaults() {
        let config = ThesaurusConfig::from_toml(
            r#"
            [parse]
            continuation = "one-per-line"
            bold = { open = "**", close = "**" }

            [scheme]
            title = "INIS Thesaurus 2018"
            issued = "2018-07-01"
            "#,
        )
        .unwrap();
        assert_eq!(config.parse.continuation, ContinuationMode::OnePerLine);
        assert_eq!(config.parse.bold, BoldMarkup::markdown());
        assert_eq!(config.scheme.title, "INIS Thesaurus 2018");
        assert_eq!(config.scheme.issued.as_deref(), Some("2018-07-01"));
        assert_eq!(config.scheme.base_iri, SchemeMetadata::default().base_iri);
    }

    #[test]
    fn unknown_continuation_is_a_config_error() {
        let err = ThesaurusConfig::from_toml("[parse]\ncontinuation = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, ThesaurusError::Config(_)));
    }
}
