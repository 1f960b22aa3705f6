//! Relationship line parsing.
//!
//! Code lines start with `UF`, `SF`, `BT`, `NT`, `RT`, `USE` or `SEE`,
//! optionally flagged with `*` or `+`. `BT`/`NT` may carry a hierarchy level
//! (`BT1`, `NT2`); only level 1 names a direct neighbour.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::config::ContinuationMode;
use crate::model::RelationKind;
use crate::slug::normalize_whitespace;

#[allow(clippy::expect_used)]
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[*+]?\s*(?:(BT|NT)(\d*)|(UF|SF|RT|USE|SEE))(?:\s+(.*?))?\s*$")
        .expect("relationship code pattern is a valid regex")
});

/// A recognized code line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CodeLine<'a> {
    code: &'a str,
    /// `None` for codes deeper than level 1 (transitive restatements).
    kind: Option<RelationKind>,
    target: &'a str,
}

fn parse_code_line(line: &str) -> Option<CodeLine<'_>> {
    let caps = CODE_RE.captures(line)?;
    let target = caps.get(4).map_or("", |m| m.as_str());
    if let Some(code) = caps.get(1) {
        let level = caps.get(2).map_or("", |m| m.as_str());
        let direct = level.is_empty() || level.parse::<u32>().map_or(false, |n| n <= 1);
        let kind = match code.as_str() {
            "BT" => RelationKind::Broader,
            _ => RelationKind::Narrower,
        };
        return Some(CodeLine {
            code: code.as_str(),
            kind: direct.then_some(kind),
            target,
        });
    }
    let code = caps.get(3)?.as_str();
    let kind = match code {
        "UF" | "SF" => RelationKind::AltLabel,
        "RT" => RelationKind::Related,
        _ => RelationKind::Redirect,
    };
    Some(CodeLine {
        code,
        kind: Some(kind),
        target,
    })
}

/// True when `line` begins with a relationship code.
#[must_use]
pub fn is_code_line(line: &str) -> bool {
    CODE_RE.is_match(line)
}

/// Relations parsed from one block, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRelations {
    /// `(kind, target label)` pairs.
    pub relations: Vec<(RelationKind, String)>,
    /// Codes that had no target text.
    pub problems: Vec<String>,
    /// Targets under level-2+ codes that were skipped.
    pub skipped: usize,
}

/// Parses relationship lines. `lines` should start at the first code line;
/// leading non-code lines are ignored.
#[must_use]
pub fn parse_relations<S: AsRef<str>>(lines: &[S], mode: ContinuationMode) -> ParsedRelations {
    let mut parsed = ParsedRelations::default();
    let mut current: Option<(CodeLine<'_>, Vec<String>)> = None;

    for line in lines {
        let line = line.as_ref();
        if let Some(code_line) = parse_code_line(line) {
            if let Some(open) = current.take() {
                flush(open, &mut parsed);
            }
            let target = normalize_whitespace(code_line.target);
            let parts = if target.is_empty() { Vec::new() } else { vec![target] };
            current = Some((code_line, parts));
            continue;
        }
        let text = normalize_whitespace(line);
        if text.is_empty() {
            continue;
        }
        let Some((_, parts)) = current.as_mut() else {
            continue;
        };
        match parts.last_mut() {
            Some(last) if mode == ContinuationMode::Joined => {
                last.push(' ');
                last.push_str(&text);
            }
            _ => parts.push(text),
        }
    }
    if let Some(open) = current.take() {
        flush(open, &mut parsed);
    }
    parsed
}

fn flush((code_line, parts): (CodeLine<'_>, Vec<String>), parsed: &mut ParsedRelations) {
    if parts.is_empty() {
        parsed
            .problems
            .push(format!("`{}` line without a target", code_line.code));
        return;
    }
    match code_line.kind {
        Some(kind) => parsed
            .relations
            .extend(parts.into_iter().map(|target| (kind, target))),
        None => {
            trace!(code = code_line.code, targets = parts.len(), "skipped indirect level");
            parsed.skipped += parts.len();
        }
    }
}
