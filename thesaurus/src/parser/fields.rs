//! Field extraction: history notes, introduction dates and definition text.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::{IntroductionDates, ThesaurusDate, WarningKind};
use crate::parser::relations::is_code_line;
use crate::slug::normalize_whitespace;

/// Fields pulled out of one block, plus the lines left for relationship parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// INIS / ETDE introduction dates.
    pub dates: IntroductionDates,
    /// Definition text, whitespace-normalized.
    pub definition: Option<String>,
    /// Parenthetical notes in document order.
    pub history_notes: Vec<String>,
    /// Lines from the first relationship code line on, parentheticals removed.
    pub relation_lines: Vec<String>,
    /// Problems found while extracting.
    pub warnings: Vec<(WarningKind, String)>,
}

/// Extracts dates, definition and history notes from a block body.
///
/// `lines[0]` is the remainder of the label line; the rest are the body lines
/// with bold markup already removed.
#[must_use]
pub fn extract_fields(lines: &[String]) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    let stripped = strip_parentheticals(&lines.join("\n"));
    fields.history_notes = stripped.notes;
    if let Some(problem) = stripped.problem {
        fields.warnings.push((WarningKind::MalformedBlock, problem));
    }
    let lines: Vec<&str> = stripped.text.split('\n').collect();

    let first_code = lines
        .iter()
        .position(|l| is_code_line(l))
        .unwrap_or(lines.len());
    let (prose, relations) = lines.split_at(first_code);
    fields.relation_lines = relations.iter().map(|l| (*l).to_owned()).collect();

    // Date region: the label-line remainder, then leading date-only lines.
    // A label-line remainder with prose in it is definition text, dates and all.
    let mut tokens = Vec::new();
    let mut definition = String::new();
    let mut in_date_region = true;
    for (i, line) in prose.iter().enumerate() {
        if in_date_region && i == 0 {
            let mut found = Vec::new();
            let residue = scan_dates(line, &mut found);
            if is_separator_only(&residue) {
                tokens.append(&mut found);
                continue;
            }
        } else if in_date_region && is_date_only(line) {
            scan_dates(line, &mut tokens);
            continue;
        }
        in_date_region = false;
        definition.push_str(line);
        definition.push(' ');
    }

    let definition = tidy_punctuation(&normalize_whitespace(&definition));
    if !definition.is_empty() {
        fields.definition = Some(definition);
    }

    match assign_dates(&tokens) {
        Ok(dates) => fields.dates = dates,
        Err(warning) => fields.warnings.push(warning),
    }
    fields
}

/// Output of [`strip_parentheticals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// Text with every balanced span removed.
    pub text: String,
    /// Span contents, outer parentheses removed, in order.
    pub notes: Vec<String>,
    /// Description of an unbalanced parenthesis, if any.
    pub problem: Option<String>,
}

/// Removes every outermost balanced `( ... )` span from `text`.
///
/// Nested parentheses stay inside their enclosing note. An unclosed span is put
/// back verbatim and reported; a stray `)` is kept and reported.
#[must_use]
pub fn strip_parentheticals(text: &str) -> Stripped {
    let mut out = String::with_capacity(text.len());
    let mut notes = Vec::new();
    let mut problem = None;
    let mut depth = 0usize;
    let mut span = String::new();

    for ch in text.chars() {
        match ch {
            '(' => {
                if depth > 0 {
                    span.push(ch);
                }
                depth += 1;
            }
            ')' if depth == 0 => {
                problem.get_or_insert_with(|| "unmatched ')'".to_owned());
                out.push(ch);
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let note = normalize_whitespace(&span);
                    if !note.is_empty() {
                        notes.push(note);
                    }
                    span.clear();
                } else {
                    span.push(ch);
                }
            }
            _ if depth > 0 => span.push(ch),
            _ => out.push(ch),
        }
    }

    if depth > 0 {
        problem = Some("unclosed '('".to_owned());
        out.push('(');
        out.push_str(&span);
    }

    Stripped {
        text: out,
        notes,
        problem,
    }
}

#[allow(clippy::expect_used)]
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+([.,;:])").expect("punctuation pattern is a valid regex")
});

/// Drops the space a removed parenthetical leaves before `.`, `,`, `;` or `:`.
fn tidy_punctuation(text: &str) -> String {
    SPACE_BEFORE_PUNCT_RE.replace_all(text, "$1").into_owned()
}

/// Which thesaurus a labeled date belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateSource {
    Inis,
    Etde,
}

/// A date token found in the date region.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DateToken {
    source: Option<DateSource>,
    text: String,
    date: Option<ThesaurusDate>,
}

#[allow(clippy::expect_used)]
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\b(INIS|ETDE)\b\s*:?\s*)?\b((?:19|20)\d{2})(?:-(\d{1,2})(?:-(\d{1,2}))?)?\b")
        .expect("date pattern is a valid regex")
});

/// Collects date tokens from `line` and returns the text left once they are removed.
fn scan_dates(line: &str, tokens: &mut Vec<DateToken>) -> String {
    let re = &*DATE_RE;
    for caps in re.captures_iter(line) {
        let source = caps.get(1).map(|m| {
            if m.as_str().eq_ignore_ascii_case("inis") {
                DateSource::Inis
            } else {
                DateSource::Etde
            }
        });
        let year: i32 = caps[2].parse().unwrap_or_default();
        let month = caps.get(3).and_then(|m| m.as_str().parse::<u32>().ok());
        let day = caps.get(4).and_then(|m| m.as_str().parse::<u32>().ok());
        let date = match (month, day) {
            (None, _) => Some(ThesaurusDate::Year(year)),
            (Some(m), None) => (1..=12).contains(&m).then_some(ThesaurusDate::YearMonth(year, m)),
            (Some(m), Some(d)) => NaiveDate::from_ymd_opt(year, m, d).map(ThesaurusDate::Day),
        };
        tokens.push(DateToken {
            source,
            text: caps[0].trim().to_owned(),
            date,
        });
    }
    re.replace_all(line, " ").into_owned()
}

/// True when `line` holds nothing but date tokens, markers and separators.
fn is_date_only(line: &str) -> bool {
    if !DATE_RE.is_match(line) {
        return false;
    }
    is_separator_only(&DATE_RE.replace_all(line, ""))
}

fn is_separator_only(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || matches!(c, ':' | ';' | ',' | '.' | '/'))
}

/// Applies the date-count rule. Ambiguity leaves both fields unset.
fn assign_dates(tokens: &[DateToken]) -> Result<IntroductionDates, (WarningKind, String)> {
    if let Some(bad) = tokens.iter().find(|t| t.date.is_none()) {
        return Err((
            WarningKind::MalformedBlock,
            format!("invalid date `{}`", bad.text),
        ));
    }
    let mut dates = IntroductionDates::default();
    match tokens {
        [] => {}
        [only] => match only.source {
            None => {
                dates.inis = only.date;
                dates.etde = only.date;
            }
            Some(DateSource::Inis) => dates.inis = only.date,
            Some(DateSource::Etde) => dates.etde = only.date,
        },
        [a, b] => match (a.source, b.source) {
            (Some(DateSource::Inis), Some(DateSource::Etde)) => {
                dates.inis = a.date;
                dates.etde = b.date;
            }
            (Some(DateSource::Etde), Some(DateSource::Inis)) => {
                dates.inis = b.date;
                dates.etde = a.date;
            }
            _ => {
                return Err((
                    WarningKind::AmbiguousDateFormat,
                    format!("two dates without distinct INIS/ETDE markers: `{}`, `{}`", a.text, b.text),
                ))
            }
        },
        more => {
            return Err((
                WarningKind::AmbiguousDateFormat,
                format!("{} date tokens after label", more.len()),
            ))
        }
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_owned).collect()
    }

    fn year(y: i32) -> Option<ThesaurusDate> {
        Some(ThesaurusDate::Year(y))
    }

    #[test]
    fn no_date_leaves_both_unset() {
        let f = extract_fields(&lines("\nBT NUCLEAR ENGINEERING"));
        assert_eq!(f.dates, IntroductionDates::default());
        assert!(f.warnings.is_empty());
    }

    #[test]
    fn one_bare_date_sets_both() {
        let f = extract_fields(&lines(" 1975\nBT NUCLEAR REACTIONS"));
        assert_eq!(f.dates.inis, year(1975));
        assert_eq!(f.dates.etde, year(1975));
        assert_eq!(f.definition, None);
    }

    #[test]
    fn two_labeled_dates_are_independent() {
        let f = extract_fields(&lines("\nINIS: 1996-06-28; ETDE: 2002-04-26\nRT FUSION"));
        let inis = NaiveDate::from_ymd_opt(1996, 6, 28).map(ThesaurusDate::Day);
        let etde = NaiveDate::from_ymd_opt(2002, 4, 26).map(ThesaurusDate::Day);
        assert_eq!(f.dates.inis, inis);
        assert_eq!(f.dates.etde, etde);
        assert!(f.warnings.is_empty());
    }

    #[test]
    fn single_labeled_date_sets_only_its_field() {
        let f = extract_fields(&lines(" ETDE: 1980-05"));
        assert_eq!(f.dates.inis, None);
        assert_eq!(f.dates.etde, Some(ThesaurusDate::YearMonth(1980, 5)));
    }

    #[test]
    fn two_unlabeled_dates_are_ambiguous() {
        let f = extract_fields(&lines(" 1975 1980"));
        assert_eq!(f.dates, IntroductionDates::default());
        assert_eq!(f.warnings.len(), 1);
        assert_eq!(f.warnings[0].0, WarningKind::AmbiguousDateFormat);
    }

    #[test]
    fn three_dates_are_ambiguous() {
        let f = extract_fields(&lines(" INIS: 1975\nETDE: 1976\n1977"));
        assert_eq!(f.dates, IntroductionDates::default());
        assert_eq!(f.warnings[0].0, WarningKind::AmbiguousDateFormat);
    }

    #[test]
    fn impossible_calendar_date_is_malformed() {
        let f = extract_fields(&lines(" 1999-02-30"));
        assert_eq!(f.dates, IntroductionDates::default());
        assert_eq!(f.warnings[0].0, WarningKind::MalformedBlock);
    }

    #[test]
    fn years_inside_definition_are_not_dates() {
        let f = extract_fields(&lines(
            " 1975\nFission reactors built after 1990.\nBT REACTORS",
        ));
        assert_eq!(f.dates.inis, year(1975));
        assert_eq!(
            f.definition.as_deref(),
            Some("Fission reactors built after 1990.")
        );
    }

    #[test]
    fn prose_after_label_keeps_its_years() {
        let f = extract_fields(&lines(" Plants built after 1990.\nBT REACTORS"));
        assert_eq!(f.dates, IntroductionDates::default());
        assert!(f.warnings.is_empty());
        assert_eq!(f.definition.as_deref(), Some("Plants built after 1990."));
    }

    #[test]
    fn removed_note_leaves_no_space_before_punctuation() {
        let f = extract_fields(&lines("\nPhysics of reactors (general).\nCore (fuel) , coolant (water) ; moderator."));
        assert_eq!(
            f.definition.as_deref(),
            Some("Physics of reactors. Core, coolant; moderator.")
        );
        assert_eq!(f.history_notes, vec!["general", "fuel", "water"]);
    }

    #[test]
    fn definition_spans_lines_until_first_code() {
        let f = extract_fields(&lines(
            "\n  Study of the   behaviour\nof neutrons in reactors.\nBT NUCLEAR ENGINEERING\nRT NEUTRONS",
        ));
        assert_eq!(
            f.definition.as_deref(),
            Some("Study of the behaviour of neutrons in reactors.")
        );
        assert_eq!(f.relation_lines, vec!["BT NUCLEAR ENGINEERING", "RT NEUTRONS"]);
    }

    #[test]
    fn history_notes_come_from_everywhere_in_order() {
        let f = extract_fields(&lines(
            " 1975 (nuclear process)\nSplitting of nuclei (see also decay).\nBT NUCLEAR REACTIONS (until 1996)",
        ));
        assert_eq!(
            f.history_notes,
            vec!["nuclear process", "see also decay", "until 1996"]
        );
        assert_eq!(f.definition.as_deref(), Some("Splitting of nuclei."));
        assert_eq!(f.relation_lines[0].trim(), "BT NUCLEAR REACTIONS");
    }

    #[test]
    fn nested_and_multiline_spans() {
        let s = strip_parentheticals("A (one (two)\nthree) B");
        assert_eq!(s.notes, vec!["one (two) three"]);
        assert_eq!(s.text, "A  B");
        assert!(s.problem.is_none());
    }

    #[test]
    fn unbalanced_parentheses_are_reported_and_kept() {
        let s = strip_parentheticals("A (open");
        assert_eq!(s.text, "A (open");
        assert!(s.notes.is_empty());
        assert!(s.problem.is_some());

        let s = strip_parentheticals("A ) B");
        assert_eq!(s.text, "A ) B");
        assert!(s.problem.is_some());
    }
}
