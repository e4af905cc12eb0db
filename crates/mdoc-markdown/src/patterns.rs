//! Regular expressions shared by the preprocessing passes.

use std::sync::LazyLock;

use regex::Regex;

/// Fenced Mermaid block; group 1 is the interior, newlines included.
pub(crate) static MERMAID_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```mermaid\n(.*?)```").unwrap());

/// Display math `$$...$$`, may span lines.
pub(crate) static DISPLAY_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap());

/// Anything that makes a math span need a real renderer.
pub(crate) static MATH_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+|[_^{}]|\\[^a-zA-Z]").unwrap());

/// Mermaid node label `["..."]`.
pub(crate) static NODE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\["([^"]+)"\]"#).unwrap());

/// Bold markers escaped with backslashes: `\*\*text\*\*`.
pub(crate) static ESCAPED_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\*\\\*([^*]+?)\\\*\\\*").unwrap());

/// Ordered list item at the start of a (left-trimmed) line.
pub(crate) static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// First-level heading anywhere in the document.
pub(crate) static H1_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Whether a math span can be shown as plain text.
pub(crate) fn is_simple_math(content: &str) -> bool {
    !MATH_SYNTAX.is_match(content)
}
