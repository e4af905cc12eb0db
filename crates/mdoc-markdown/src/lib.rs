//! Markdown to HTML conversion with rasterized diagrams and equations.
//!
//! The pipeline runs these passes in order:
//!
//! 1. Mermaid blocks are sanitized, rendered and replaced with `<img>` tags.
//! 2. `$$...$$` and then `$...$` math is replaced with images, or with plain
//!    text when it contains no LaTeX syntax.
//! 3. The Markdown is normalized (BOM, escaped bold, list spacing).
//! 4. pulldown-cmark renders the body, which is wrapped in the HTML template.
//!
//! Rendering goes through the [`mdoc_raster::Rasterizer`] trait, so the passes
//! don't depend on a particular browser.

mod convert;
mod error;
mod locate;
mod normalize;
mod output;
mod patterns;
mod sanitize;
mod substitute;
mod template;
#[cfg(test)]
mod testing;

pub use convert::{ConvertOptions, md_to_html};
pub use error::ConvertError;
pub use normalize::normalize_markdown;
pub use output::{
    DEFAULT_DIAGRAM_DIR, DEFAULT_EQUATION_DIR, ImageFiles, ImageOutput, png_file_to_base64,
    png_to_base64,
};
pub use sanitize::sanitize_diagram;
pub use template::{DEFAULT_TITLE, render_document, resolve_title};
