//! Markdown normalization before rendering.

use std::borrow::Cow;

use crate::patterns::{ESCAPED_BOLD, ORDERED_ITEM};

/// Line-break marker inserted before a list or heading that directly
/// follows a text line.
const LINE_BREAK: &str = "<br/>";

/// Strip a leading BOM and turn CRLF line endings into LF.
pub(crate) fn source_text(markdown: &str) -> Cow<'_, str> {
    let text = markdown.strip_prefix('\u{feff}').unwrap_or(markdown);
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Prepare Markdown for the renderer.
///
/// Strips a leading BOM, turns `\*\*text\*\*` back into `**text**`, and
/// inserts a `<br/>` line between a text line and a directly following
/// list item or heading so the two are not fused into one paragraph.
/// Lines inside fenced code blocks are never touched.
#[must_use]
pub fn normalize_markdown(markdown: &str) -> String {
    let text = markdown.strip_prefix('\u{feff}').unwrap_or(markdown);
    let text = ESCAPED_BOLD.replace_all(text, "**${1}**");

    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    for (i, line) in lines.iter().enumerate() {
        out.push(*line);
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let Some(next) = lines.get(i + 1) else {
            continue;
        };
        let is_text = !line.trim().is_empty() && line.trim() != LINE_BREAK && !starts_block(line);
        if is_text && !next.trim().is_empty() && starts_block(next) {
            out.push(LINE_BREAK);
        }
    }
    out.join("\n")
}

/// Opening or closing line of a fenced code block.
fn is_fence(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("```") || line.starts_with("~~~")
}

/// Whether a line starts a list item or a heading.
fn starts_block(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("- ")
        || line.starts_with("* ")
        || line.starts_with("+ ")
        || line.starts_with('#')
        || ORDERED_ITEM.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_bom() {
        assert_eq!(normalize_markdown("\u{feff}# Title"), "# Title");
    }

    #[test]
    fn test_restores_escaped_bold() {
        assert_eq!(
            normalize_markdown(r"\*\*DTLS\*\*는 보안 프로토콜"),
            "**DTLS**는 보안 프로토콜"
        );
    }

    #[test]
    fn test_inserts_break_before_list() {
        assert_eq!(
            normalize_markdown("Items:\n- one\n- two"),
            "Items:\n<br/>\n- one\n- two"
        );
    }

    #[test]
    fn test_inserts_break_before_ordered_item_and_heading() {
        assert_eq!(
            normalize_markdown("Steps\n1. first\ntext\n## Next"),
            "Steps\n<br/>\n1. first\ntext\n<br/>\n## Next"
        );
    }

    #[test]
    fn test_blank_separated_untouched() {
        let text = "Items:\n\n- one\n- two\n\n# Heading";
        assert_eq!(normalize_markdown(text), text);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_markdown("Intro\n* a\n* b\nOutro\n# End");
        assert_eq!(normalize_markdown(&once), once);
    }

    #[test]
    fn test_code_fence_untouched() {
        let text = "Run:\n\n```bash\necho hi\n# comment\n- not a list\n```\nDone\n# Next";
        assert_eq!(
            normalize_markdown(text),
            "Run:\n\n```bash\necho hi\n# comment\n- not a list\n```\nDone\n<br/>\n# Next"
        );
    }

    #[test]
    fn test_source_text_strips_bom_and_crlf() {
        assert_eq!(source_text("\u{feff}# T\r\n\r\nbody\r\n"), "# T\n\nbody\n");
        assert!(matches!(source_text("# T\nbody"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_plain_paragraph_untouched() {
        let text = "line one\nline two\n-not a list";
        assert_eq!(normalize_markdown(text), text);
    }
}
