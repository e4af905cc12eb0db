//! Block locator and single-pass range splicing.
//!
//! Locators return spans of the input in left-to-right order. Replacements
//! are collected in a [`Splice`] and written out in one pass, so replaced
//! text is never scanned again.

use std::ops::Range;

use crate::patterns::{DISPLAY_MATH, MERMAID_BLOCK};

/// A located block: the whole match and its interior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span<'a> {
    /// Byte range of the full match, delimiters included.
    pub range: Range<usize>,
    /// Text between the delimiters.
    pub inner: &'a str,
}

fn regex_spans<'a>(re: &regex::Regex, text: &'a str) -> Vec<Span<'a>> {
    re.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(Span {
                range: whole.range(),
                inner: inner.as_str(),
            })
        })
        .collect()
}

/// Fenced Mermaid blocks.
pub(crate) fn diagram_blocks(text: &str) -> Vec<Span<'_>> {
    regex_spans(&MERMAID_BLOCK, text)
}

/// `$$...$$` spans.
pub(crate) fn display_math(text: &str) -> Vec<Span<'_>> {
    regex_spans(&DISPLAY_MATH, text)
}

/// `$...$` spans on a single line.
///
/// Neither delimiter may touch another `$`, which keeps `$$` pairs and
/// doubled dollars out. The interior is at least one character and may
/// contain `$` signs that don't qualify as a closing delimiter.
pub(crate) fn inline_math(text: &str) -> Vec<Span<'_>> {
    let bytes = text.as_bytes();
    let is_dollar = |i: usize| bytes.get(i) == Some(&b'$');

    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let opens = bytes[i] == b'$' && !(i > 0 && is_dollar(i - 1)) && !is_dollar(i + 1);
        if !opens {
            i += 1;
            continue;
        }

        let close = (i + 1..bytes.len())
            .take_while(|&k| bytes[k] != b'\n')
            .find(|&k| k > i + 1 && bytes[k] == b'$' && !is_dollar(k - 1) && !is_dollar(k + 1));

        match close {
            Some(k) => {
                spans.push(Span {
                    range: i..k + 1,
                    inner: &text[i + 1..k],
                });
                i = k + 1;
            }
            None => i += 1,
        }
    }
    spans
}

/// Collects range replacements for single-pass application.
///
/// Ranges must be added in ascending, non-overlapping order.
#[derive(Debug, Default)]
pub(crate) struct Splice {
    edits: Vec<(Range<usize>, String)>,
}

impl Splice {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace `range` of the source with `with`.
    pub(crate) fn add(&mut self, range: Range<usize>, with: String) {
        debug_assert!(self.edits.last().is_none_or(|(r, _)| r.end <= range.start));
        self.edits.push((range, with));
    }

    /// Build the edited text.
    pub(crate) fn apply(self, text: &str) -> String {
        if self.edits.is_empty() {
            return text.to_owned();
        }

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        for (range, with) in self.edits {
            out.push_str(&text[pos..range.start]);
            out.push_str(&with);
            pos = range.end;
        }
        out.push_str(&text[pos..]);
        out
    }
}
