//! Strip browser-only tags before handing HTML to pandoc.

use std::sync::LazyLock;

use regex::Regex;

static KATEX_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<link[^>]*katex[^>]*>").unwrap());

static KATEX_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*katex[^>]*>.*?</script>").unwrap());

static MERMAID_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*mermaid[^>]*>.*?</script>").unwrap());

/// Remove `KaTeX` stylesheet links and `KaTeX`/Mermaid script blocks.
///
/// Everything else, including literal `$$...$$` text, is kept for pandoc's
/// own math handling.
#[must_use]
pub fn clean_html_for_pandoc(html: &str) -> String {
    let html = KATEX_LINK.replace_all(html, "");
    let html = KATEX_SCRIPT.replace_all(&html, "");
    MERMAID_SCRIPT.replace_all(&html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_removes_katex_link() {
        let html = r#"<head><LINK rel="stylesheet" href="https://cdn/katex.min.css"><title>T</title></head>"#;
        assert_eq!(clean_html_for_pandoc(html), "<head><title>T</title></head>");
    }

    #[test]
    fn test_removes_scripts() {
        let html = "<script src=\"katex.min.js\"></script>\
                    <p>keep</p>\
                    <SCRIPT type=\"text/javascript\" src=\"mermaid.js\">\nmermaid.run();\n</SCRIPT>";
        assert_eq!(clean_html_for_pandoc(html), "<p>keep</p>");
    }

    #[test]
    fn test_keeps_display_math_and_other_tags() {
        let html = r#"<link rel="icon" href="x.png"><script>var a = 1;</script><p>$$a+b$$</p>"#;
        assert_eq!(clean_html_for_pandoc(html), html);
    }
}
