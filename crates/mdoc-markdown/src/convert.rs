//! Markdown to HTML pipeline.

use mdoc_raster::Rasterizer;
use pulldown_cmark::{Options, Parser, html};

use crate::ConvertError;
use crate::normalize::{normalize_markdown, source_text};
use crate::output::ImageOutput;
use crate::substitute::Substituter;
use crate::template::{render_document, resolve_title};

/// Options for [`md_to_html`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Document title; falls back to the first `# Heading`.
    pub title: Option<String>,
    /// How rendered images are referenced.
    pub output: ImageOutput,
}

impl ConvertOptions {
    /// Set the document title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the image output mode.
    #[must_use]
    pub fn output(mut self, output: ImageOutput) -> Self {
        self.output = output;
        self
    }
}

/// Convert Markdown to a complete HTML document.
///
/// Mermaid blocks and math spans are rendered through `rasterizer` and
/// replaced with `<img>` tags before the Markdown itself is rendered.
///
/// # Errors
///
/// Returns an error if a diagram fails to render or an image file cannot be
/// written. Failed equations degrade to an empty image reference instead.
///
/// # Example
///
/// ```ignore
/// use mdoc_markdown::{ConvertOptions, md_to_html};
/// use mdoc_raster::{ChromeSession, RasterConfig};
///
/// let mut session = ChromeSession::new(RasterConfig::default());
/// let html = md_to_html("# Hi\n\n$x^2$", &ConvertOptions::default(), &mut session)?;
/// session.release();
/// ```
pub fn md_to_html(
    markdown: &str,
    options: &ConvertOptions,
    rasterizer: &mut dyn Rasterizer,
) -> Result<String, ConvertError> {
    let markdown = source_text(markdown);
    let title = resolve_title(options.title.as_deref(), &markdown);

    let mut substituter = Substituter::new(rasterizer, &options.output);
    let text = substituter.diagrams(&markdown)?;
    let text = substituter.math(&text)?;
    let text = normalize_markdown(&text);

    let body = render_body(&text);
    Ok(render_document(&title, &body))
}

/// Render Markdown to an HTML fragment.
fn render_body(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, parser);
    body
}
