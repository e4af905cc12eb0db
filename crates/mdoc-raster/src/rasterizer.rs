//! Rendering interface used by the substitution passes.

use crate::RasterError;

/// Layout of a math expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    /// Block equation (`$$...$$`).
    Display,
    /// Equation inside a line of text (`$...$`).
    Inline,
}

impl MathMode {
    /// Short name used in file names (`eq_display_001.png`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Inline => "inline",
        }
    }
}

/// Turns diagram and equation source into PNG bytes.
///
/// Implementations hold the browser state, so every call takes `&mut self`.
pub trait Rasterizer {
    /// Render Mermaid source to a PNG image.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Timeout`] if the diagram does not appear in time.
    fn render_diagram(&mut self, code: &str) -> Result<Vec<u8>, RasterError>;

    /// Render a LaTeX expression to a PNG image.
    ///
    /// Returns `Ok(None)` when the equation page failed and the caller should
    /// fall back to an empty reference.
    fn render_math(&mut self, latex: &str, mode: MathMode)
    -> Result<Option<Vec<u8>>, RasterError>;
}
