//! Export HTML and Markdown to word-processor documents.
//!
//! Local images are inlined as data URIs, browser-only script and link tags
//! are stripped, and the result is piped through [`Pandoc`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mdoc_export::{Pandoc, html_to_doc};
//!
//! html_to_doc(Path::new("report.html"), Path::new("report.docx"), &Pandoc::default())?;
//! ```

mod clean;
mod embed;
mod error;
mod pandoc;

use std::path::Path;

use mdoc_markdown::{ConvertOptions, ImageOutput, md_to_html};
use mdoc_raster::Rasterizer;

pub use clean::clean_html_for_pandoc;
pub use embed::embed_images_as_base64;
pub use error::ExportError;
pub use pandoc::{DEFAULT_FORMAT, DEFAULT_PANDOC, Pandoc};

/// Turns a finished HTML document into an output file.
pub trait DocumentConverter {
    /// Write `html` converted to the target format at `output`.
    fn convert(&self, html: &str, output: &Path) -> Result<(), ExportError>;
}

impl DocumentConverter for Pandoc {
    fn convert(&self, html: &str, output: &Path) -> Result<(), ExportError> {
        Pandoc::convert(self, html, output)
    }
}

fn read_input(path: &Path) -> Result<String, ExportError> {
    std::fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert an HTML file into a document.
///
/// Images are resolved relative to the HTML file's directory.
pub fn html_to_doc(
    html_path: &Path,
    output: &Path,
    converter: &dyn DocumentConverter,
) -> Result<(), ExportError> {
    tracing::info!(path = %html_path.display(), "Reading HTML");
    let html = read_input(html_path)?;

    let base_dir = std::path::absolute(html_path)?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let html = embed_images_as_base64(&html, &base_dir);
    let html = clean_html_for_pandoc(&html);

    converter.convert(&html, output)?;
    tracing::info!(path = %output.display(), "Document written");
    Ok(())
}

/// Convert a Markdown file into a document.
///
/// Diagrams and equations are always embedded as data URIs, so no image
/// files are left behind.
pub fn md_to_doc(
    md_path: &Path,
    output: &Path,
    title: Option<&str>,
    rasterizer: &mut dyn Rasterizer,
    converter: &dyn DocumentConverter,
) -> Result<(), ExportError> {
    tracing::info!(path = %md_path.display(), "Reading Markdown");
    let markdown = read_input(md_path)?;

    let options = ConvertOptions {
        title: title.map(str::to_owned),
        output: ImageOutput::Inline,
    };
    let html = md_to_html(&markdown, &options, rasterizer)?;
    let html = clean_html_for_pandoc(&html);

    converter.convert(&html, output)?;
    tracing::info!(path = %output.display(), "Document written");
    Ok(())
}
