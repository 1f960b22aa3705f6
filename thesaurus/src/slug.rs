//! Label normalization and concept id derivation.

use crate::model::ConceptId;
use crate::parser::fields::strip_parentheticals;

/// Derives the concept id for a preferred label.
///
/// Alphanumeric runs are lowercased and joined by single hyphens; everything
/// else is a separator. Returns `None` when the label has no alphanumeric
/// characters. Distinct labels may collide (`"U-235"` and `"U 235"`); the graph
/// builder reports that as a duplicate.
#[must_use]
pub fn concept_id(label: &str) -> Option<ConceptId> {
    let mut slug = String::with_capacity(label.len());
    let mut pending_sep = false;
    for ch in label.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        None
    } else {
        Some(ConceptId::new(slug))
    }
}

/// Lookup key used to match relation targets against block labels: the
/// concept id of the label, so case, spacing and punctuation do not matter.
#[must_use]
pub fn label_key(label: &str) -> String {
    concept_id(label).map_or_else(
        || normalize_whitespace(label).to_lowercase(),
        |id| id.as_str().to_owned(),
    )
}

/// Lookup key of `label` with its parenthetical qualifiers removed, when that
/// differs from [`label_key`]. Relation targets lose their parentheticals
/// during extraction, so `MIXED OXIDE FUELS (MOX)` is also reachable as
/// `MIXED OXIDE FUELS`.
#[must_use]
pub fn bare_label_key(label: &str) -> Option<String> {
    let bare = strip_parentheticals(label);
    if bare.problem.is_some() || bare.notes.is_empty() {
        return None;
    }
    let id = concept_id(&bare.text)?;
    (id.as_str() != label_key(label)).then(|| id.as_str().to_owned())
}

/// Collapses runs of whitespace to single spaces and trims both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
