//! HTML and `JavaScript` for the browser pages.

use std::fmt::Write;

use crate::RasterError;
use crate::rasterizer::MathMode;
use crate::session::RasterConfig;

/// Encode `value` as a `JavaScript` string literal safe inside `<script>`.
pub(crate) fn js_string(value: &str) -> String {
    // serde_json never fails on a plain &str.
    serde_json::to_string(value)
        .unwrap_or_default()
        .replace("</", r"<\/")
}

/// Shared diagram page: Mermaid initialized once, `KaTeX` loaded alongside.
pub(crate) fn diagram_page(config: &RasterConfig) -> Result<String, RasterError> {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&config.katex_stylesheet.stylesheet_tag()?);
    html.push('\n');
    html.push_str(&config.katex_script.script_tag()?);
    html.push('\n');
    html.push_str(&config.mermaid_script.script_tag()?);
    html.push('\n');
    let _ = writeln!(
        html,
        "<script>mermaid.initialize({{ startOnLoad: false, theme: {} }});</script>",
        js_string(&config.mermaid_theme)
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(
        r#"<div id="mermaid-container" style="background: white; padding: 20px;"><div class="mermaid"></div></div>"#,
    );
    html.push_str("\n</body>\n</html>\n");
    Ok(html)
}

/// Script that swaps a new diagram into the shared page and starts rendering.
///
/// The code is assigned as text so markup in labels never becomes live DOM;
/// Mermaid decodes entities when it reads the element back.
pub(crate) fn diagram_script(code: &str) -> String {
    format!(
        "(() => {{\n\
         const container = document.getElementById('mermaid-container');\n\
         container.innerHTML = '<div class=\"mermaid\"></div>';\n\
         container.firstElementChild.textContent = {};\n\
         void mermaid.run({{ querySelector: '.mermaid' }});\n\
         return true;\n\
         }})()",
        js_string(code)
    )
}

/// Standalone page rendering one equation with `KaTeX`.
pub(crate) fn math_page(
    config: &RasterConfig,
    latex: &str,
    mode: MathMode,
) -> Result<String, RasterError> {
    let display = matches!(mode, MathMode::Display);
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&config.katex_stylesheet.stylesheet_tag()?);
    html.push('\n');
    html.push_str(&config.katex_script.script_tag()?);
    html.push_str("\n</head>\n<body style=\"margin: 0;\">\n");
    html.push_str(
        r#"<div id="latex-container" style="background: white; padding: 10px; display: inline-block;"><span id="latex-output"></span></div>"#,
    );
    let _ = write!(
        html,
        "\n<script>\n\
         const output = document.getElementById('latex-output');\n\
         try {{\n\
         katex.render({}, output, {{ displayMode: {display}, throwOnError: false }});\n\
         }} catch (e) {{\n\
         output.textContent = 'Error rendering equation';\n\
         }}\n\
         </script>\n</body>\n</html>\n",
        js_string(latex)
    );
    Ok(html)
}
