//! HTML document template.

use std::fmt::Write;

use crate::patterns::H1_HEADING;

/// Title used when neither an explicit title nor a level-1 heading exists.
pub const DEFAULT_TITLE: &str = "Document";

const STYLESHEET: &str = r#"    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Noto Sans KR", Arial, "Apple SD Gothic Neo", "Malgun Gothic", sans-serif; line-height: 1.6; padding: 2rem; max-width: 900px; margin: auto; }
    pre { background: #f6f8fa; padding: 1rem; overflow: auto; border-radius: 6px; }
    code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, "Liberation Mono", monospace; font-size: 8px; }
    table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
    th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; }
    th { background: #f6f8fa; font-weight: 600; }
    .mermaid { margin: 1rem 0; }
"#;

/// Pick the document title.
///
/// Uses `explicit` when given, otherwise the first `# Heading` of the
/// Markdown, otherwise [`DEFAULT_TITLE`].
#[must_use]
pub fn resolve_title(explicit: Option<&str>, markdown: &str) -> String {
    if let Some(title) = explicit {
        return title.to_owned();
    }
    H1_HEADING
        .captures(markdown)
        .map_or_else(|| DEFAULT_TITLE.to_owned(), |caps| caps[1].trim().to_owned())
}

/// Wrap a rendered HTML body in a complete document.
#[must_use]
pub fn render_document(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n");
    let _ = writeln!(html, "  <title>{}</title>", escape_html(title));
    html.push_str("  <style>\n");
    html.push_str(STYLESHEET);
    html.push_str("  </style>\n</head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

/// Escape text for use in HTML content.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
