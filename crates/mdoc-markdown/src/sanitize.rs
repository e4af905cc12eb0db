//! Mermaid label sanitizer.
//!
//! Characters that break Mermaid's label parser are swapped for their
//! full-width lookalikes, but only inside `["..."]` labels. Line-break tags
//! are kept as-is.

use crate::patterns::NODE_LABEL;

/// Line-break tags and their placeholders. Placeholders contain none of the
/// replaced characters, so they survive the substitution untouched.
const LINE_BREAKS: [(&str, &str); 2] = [
    ("<br/>", "\u{0}MDOC BR SLASH\u{0}"),
    ("<br>", "\u{0}MDOC BR\u{0}"),
];

const FULL_WIDTH: [(char, char); 4] = [('<', '＜'), ('>', '＞'), ('&', '＆'), ('_', '＿')];

/// Replace label characters Mermaid cannot parse.
///
/// # Example
///
/// ```
/// use mdoc_markdown::sanitize_diagram;
///
/// let code = r#"A["a_b<br/>c"] --> B"#;
/// assert_eq!(sanitize_diagram(code), r#"A["a＿b<br/>c"] --> B"#);
/// ```
#[must_use]
pub fn sanitize_diagram(code: &str) -> String {
    NODE_LABEL
        .replace_all(code, |caps: &regex::Captures<'_>| {
            format!("[\"{}\"]", sanitize_label(&caps[1]))
        })
        .into_owned()
}

fn sanitize_label(label: &str) -> String {
    let mut text = label.to_owned();
    for (tag, placeholder) in LINE_BREAKS {
        text = text.replace(tag, placeholder);
    }

    let mut out: String = text
        .chars()
        .map(|c| {
            FULL_WIDTH
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect();

    for (tag, placeholder) in LINE_BREAKS {
        out = out.replace(placeholder, tag);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replaces_inside_label() {
        assert_eq!(
            sanitize_diagram(r#"A["x < y & z > w"]"#),
            r#"A["x ＜ y ＆ z ＞ w"]"#
        );
    }

    #[test]
    fn test_keeps_line_breaks() {
        assert_eq!(
            sanitize_diagram(r#"A["first_line<br/>second<br>third"]"#),
            r#"A["first＿line<br/>second<br>third"]"#
        );
    }

    #[test]
    fn test_outside_label_untouched() {
        let code = "graph TD\n  A_1 --> B & C\n  B -->|a<b| D";
        assert_eq!(sanitize_diagram(code), code);
    }

    #[test]
    fn test_multiple_labels() {
        assert_eq!(
            sanitize_diagram(r#"A["a_b"] --> B["c&d"]"#),
            r#"A["a＿b"] --> B["c＆d"]"#
        );
    }

    #[test]
    fn test_no_labels() {
        assert_eq!(sanitize_diagram(""), "");
        assert_eq!(sanitize_diagram("graph LR"), "graph LR");
    }
}
