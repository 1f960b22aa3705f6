//! Block segmentation.
//!
//! A descriptor block starts at a line whose first non-blank content is a bold
//! run and runs up to the next such line. The segmenter is a single forward
//! pass over the document lines and yields blocks lazily.

use std::iter::{Enumerate, Peekable};
use std::str::Lines;

use tracing::debug;

use crate::config::BoldMarkup;
use crate::slug::normalize_whitespace;

/// One descriptor block as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Zero-based position among the document's blocks.
    pub ordinal: usize,
    /// One-based line number of the label line.
    pub line: usize,
    /// Descriptor label (contents of the leading bold run).
    pub label: String,
    /// Text following the bold run on the label line.
    pub header_rest: &'a str,
    /// Following lines, verbatim.
    pub body: Vec<&'a str>,
}

/// Lazy iterator over the descriptor blocks of a document.
pub struct Segmenter<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    markup: &'a BoldMarkup,
    next_ordinal: usize,
}

impl<'a> Segmenter<'a> {
    /// Creates a segmenter over `text` using `markup` as the bold delimiters.
    #[must_use]
    pub fn new(text: &'a str, markup: &'a BoldMarkup) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            markup,
            next_ordinal: 0,
        }
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut discarded = 0usize;
        let (line_no, label, header_rest) = loop {
            let (idx, line) = self.lines.next()?;
            if let Some((label, rest)) = split_header(line, self.markup) {
                break (idx + 1, label, rest);
            }
            if !line.trim().is_empty() {
                discarded += 1;
            }
        };
        if discarded > 0 {
            debug!(lines = discarded, "discarded text before first descriptor");
        }

        let mut body = Vec::new();
        while let Some((_, line)) = self.lines.peek() {
            if split_header(line, self.markup).is_some() {
                break;
            }
            body.push(*line);
            self.lines.next();
        }

        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        Some(RawBlock {
            ordinal,
            line: line_no,
            label,
            header_rest,
            body,
        })
    }
}

/// Splits a label line into its label and the remaining text.
///
/// Returns `None` when the line does not begin with a non-empty bold run.
/// Bold runs that follow the first one with only whitespace between them are
/// part of the same label (PDF extraction splits runs at font changes).
fn split_header<'a>(line: &'a str, markup: &BoldMarkup) -> Option<(String, &'a str)> {
    let (first, mut rest) = take_bold_run(line.trim_start(), markup)?;
    let mut label = first.to_owned();
    while let Some((next, after)) = take_bold_run(rest.trim_start(), markup) {
        label.push(' ');
        label.push_str(next);
        rest = after;
    }
    let label = normalize_whitespace(&label);
    if label.is_empty() {
        return None;
    }
    Some((label, rest))
}

/// Parses one bold run at the start of `text`, returning its contents and the
/// text after the closing marker.
fn take_bold_run<'a>(text: &'a str, markup: &BoldMarkup) -> Option<(&'a str, &'a str)> {
    let inner = text.strip_prefix(markup.open.as_str())?;
    let end = inner.find(markup.close.as_str())?;
    Some((&inner[..end], &inner[end + markup.close.len()..]))
}

/// Removes bold markers from a body line, keeping the marked text.
#[must_use]
pub fn strip_markup(line: &str, markup: &BoldMarkup) -> String {
    line.replace(markup.open.as_str(), "")
        .replace(markup.close.as_str(), "")
}
