//! Image substitution passes.
//!
//! Replaces Mermaid blocks and math spans with `<img>` tags before the
//! Markdown is rendered. Diagrams and equations are numbered by two
//! independent counters; simple math is emitted as text and not counted.

use mdoc_raster::{MathMode, Rasterizer};

use crate::ConvertError;
use crate::locate::{Span, Splice, diagram_blocks, display_math, inline_math};
use crate::output::{ImageKind, ImageOutput};
use crate::patterns::is_simple_math;
use crate::sanitize::sanitize_diagram;

/// Stateful substitution visitor for one document.
pub(crate) struct Substituter<'a> {
    rasterizer: &'a mut dyn Rasterizer,
    output: &'a ImageOutput,
    diagrams: usize,
    equations: usize,
}

impl<'a> Substituter<'a> {
    pub(crate) fn new(rasterizer: &'a mut dyn Rasterizer, output: &'a ImageOutput) -> Self {
        Self {
            rasterizer,
            output,
            diagrams: 0,
            equations: 0,
        }
    }

    /// Replace every fenced Mermaid block with a rendered image.
    pub(crate) fn diagrams(&mut self, text: &str) -> Result<String, ConvertError> {
        let mut splice = Splice::new();
        for span in diagram_blocks(text) {
            let tag = self.diagram(span.inner)?;
            splice.add(span.range, tag);
        }
        Ok(splice.apply(text))
    }

    /// Replace display math, then inline math in the result.
    pub(crate) fn math(&mut self, text: &str) -> Result<String, ConvertError> {
        let text = self.math_pass(text, &display_math(text), MathMode::Display)?;
        self.math_pass(&text, &inline_math(&text), MathMode::Inline)
    }

    fn math_pass(
        &mut self,
        text: &str,
        spans: &[Span<'_>],
        mode: MathMode,
    ) -> Result<String, ConvertError> {
        let mut splice = Splice::new();
        for span in spans {
            let tag = self.equation(span.inner, mode)?;
            splice.add(span.range.clone(), tag);
        }
        Ok(splice.apply(text))
    }

    fn diagram(&mut self, inner: &str) -> Result<String, ConvertError> {
        self.diagrams += 1;
        let n = self.diagrams;
        tracing::debug!(n, "Rendering diagram");

        let code = sanitize_diagram(inner.trim());
        let png = self.rasterizer.render_diagram(&code)?;
        let src = self
            .output
            .store(&png, ImageKind::Diagram, &format!("diagram_{n:03}.png"))?;

        Ok(format!(
            r#"<img src="{src}" alt="Mermaid Diagram {n}" style="max-width: 100%;" />"#
        ))
    }

    fn equation(&mut self, inner: &str, mode: MathMode) -> Result<String, ConvertError> {
        let latex = inner.trim();
        if is_simple_math(latex) {
            return Ok(match mode {
                MathMode::Display => format!(
                    r#"<div style="text-align: center; margin: 1rem 0; font-weight: bold;">{latex}</div>"#
                ),
                MathMode::Inline => format!("<code>{latex}</code>"),
            });
        }

        self.equations += 1;
        let n = self.equations;
        tracing::debug!(n, mode = mode.as_str(), "Rendering equation");

        let src = match self.rasterizer.render_math(latex, mode)? {
            Some(png) => {
                let file_name = format!("eq_{}_{n:03}.png", mode.as_str());
                self.output.store(&png, ImageKind::Equation, &file_name)?
            }
            None => String::new(),
        };

        Ok(match mode {
            MathMode::Display => format!(
                r#"<div style="text-align: center; margin: 1rem 0;"><img src="{src}" alt="Equation {n}" style="display: block; margin: 0 auto;" /></div>"#
            ),
            MathMode::Inline => format!(
                r#"<img src="{src}" alt="Equation {n}" style="display: inline-block; vertical-align: middle;" />"#
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRasterizer;
    use pretty_assertions::assert_eq;

    use crate::output::ImageFiles;

    #[test]
    fn test_diagram_replaced_with_numbered_img() {
        let mut raster = FakeRasterizer::default();
        let output = ImageOutput::Inline;
        let mut sub = Substituter::new(&mut raster, &output);

        let text = "a\n```mermaid\n  graph TD\n```\nb\n```mermaid\nB\n```\n";
        let result = sub.diagrams(text).unwrap();

        assert_eq!(raster.diagrams, vec!["graph TD", "B"]);
        assert!(result.starts_with("a\n<img src=\"data:image/png;base64,"));
        assert!(result.contains(r#"alt="Mermaid Diagram 1" style="max-width: 100%;" />"#));
        assert!(result.contains(r#"alt="Mermaid Diagram 2""#));
        assert!(!result.contains("```mermaid"));
    }

    #[test]
    fn test_diagram_code_is_sanitized() {
        let mut raster = FakeRasterizer::default();
        let output = ImageOutput::Inline;
        let mut sub = Substituter::new(&mut raster, &output);

        sub.diagrams("```mermaid\nA[\"x_y<br/>z\"]\n```").unwrap();

        assert_eq!(raster.diagrams, vec!["A[\"x＿y<br/>z\"]"]);
    }

    #[test]
    fn test_simple_math_never_rendered() {
        let mut raster = FakeRasterizer::default();
        let output = ImageOutput::Inline;
        let mut sub = Substituter::new(&mut raster, &output);

        let result = sub.math("Total: $42$ and $$ a + b $$").unwrap();

        assert!(raster.equations.is_empty());
        assert_eq!(
            result,
            r#"Total: <code>42</code> and <div style="text-align: center; margin: 1rem 0; font-weight: bold;">a + b</div>"#
        );
    }

    #[test]
    fn test_command_math_always_rendered() {
        let mut raster = FakeRasterizer::default();
        let output = ImageOutput::Inline;
        let mut sub = Substituter::new(&mut raster, &output);

        let result = sub.math(r"half is $\frac{1}{2}$").unwrap();

        assert_eq!(
            raster.equations,
            vec![(r"\frac{1}{2}".to_owned(), MathMode::Inline)]
        );
        assert!(result.contains(r#"alt="Equation 1" style="display: inline-block; vertical-align: middle;" />"#));
    }

    #[test]
    fn test_display_resolved_before_inline() {
        let mut raster = FakeRasterizer::default();
        let output = ImageOutput::Inline;
        let mut sub = Substituter::new(&mut raster, &output);

        sub.math("$$a^2$$ $c_1$").unwrap();

        assert_eq!(
            raster.equations,
            vec![
                ("a^2".to_owned(), MathMode::Display),
                ("c_1".to_owned(), MathMode::Inline),
            ]
        );
    }

    #[test]
    fn test_equation_counter_shared_across_modes() {
        let mut raster = FakeRasterizer::default();
        let dir = tempfile::tempdir().unwrap();
        let output = ImageOutput::Files(ImageFiles::new(dir.path()));
        let mut sub = Substituter::new(&mut raster, &output);

        let result = sub.math("$$x^2$$\n\n$y$ then $z_1$").unwrap();

        assert!(result.contains(r#"<img src="latex_equations/eq_display_001.png" alt="Equation 1""#));
        assert!(result.contains(r#"<img src="latex_equations/eq_inline_002.png" alt="Equation 2""#));
        assert!(result.contains("<code>y</code>"));
        assert!(dir.path().join("latex_equations/eq_display_001.png").is_file());
        assert!(dir.path().join("latex_equations/eq_inline_002.png").is_file());
    }

    #[test]
    fn test_degraded_math_leaves_empty_src() {
        let mut raster = FakeRasterizer {
            fail_math: true,
            ..FakeRasterizer::default()
        };
        let output = ImageOutput::Inline;
        let mut sub = Substituter::new(&mut raster, &output);

        let result = sub.math(r"$$\sum x$$").unwrap();

        assert_eq!(
            result,
            r#"<div style="text-align: center; margin: 1rem 0;"><img src="" alt="Equation 1" style="display: block; margin: 0 auto;" /></div>"#
        );
    }

    #[test]
    fn test_diagram_timeout_propagates() {
        let mut raster = FakeRasterizer {
            fail_diagrams: true,
            ..FakeRasterizer::default()
        };
        let output = ImageOutput::Inline;
        let mut sub = Substituter::new(&mut raster, &output);

        let err = sub.diagrams("```mermaid\ngraph TD\n```").unwrap_err();

        assert!(matches!(
            err,
            ConvertError::Raster(mdoc_raster::RasterError::Timeout(_))
        ));
    }

    #[test]
    fn test_diagram_files_written() {
        let mut raster = FakeRasterizer::default();
        let dir = tempfile::tempdir().unwrap();
        let output = ImageOutput::Files(ImageFiles::new(dir.path()));
        let mut sub = Substituter::new(&mut raster, &output);

        let result = sub.diagrams("```mermaid\nA\n```").unwrap();

        assert_eq!(
            result,
            r#"<img src="mermaid_diagrams/diagram_001.png" alt="Mermaid Diagram 1" style="max-width: 100%;" />"#
        );
        assert!(dir.path().join("mermaid_diagrams/diagram_001.png").is_file());
    }
}
