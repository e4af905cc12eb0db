//! Recording rasterizer for tests.

use std::time::Duration;

use mdoc_raster::{MathMode, RasterError, Rasterizer};

/// Fake PNG returned for every render.
const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Records every render request instead of launching a browser.
#[derive(Debug, Default)]
pub(crate) struct FakeRasterizer {
    pub diagrams: Vec<String>,
    pub equations: Vec<(String, MathMode)>,
    /// Make every diagram time out.
    pub fail_diagrams: bool,
    /// Make every equation degrade.
    pub fail_math: bool,
}

impl Rasterizer for FakeRasterizer {
    fn render_diagram(&mut self, code: &str) -> Result<Vec<u8>, RasterError> {
        self.diagrams.push(code.to_owned());
        if self.fail_diagrams {
            return Err(RasterError::Timeout(Duration::from_secs(5)));
        }
        Ok(PNG.to_vec())
    }

    fn render_math(
        &mut self,
        latex: &str,
        mode: MathMode,
    ) -> Result<Option<Vec<u8>>, RasterError> {
        self.equations.push((latex.to_owned(), mode));
        Ok((!self.fail_math).then(|| PNG.to_vec()))
    }
}
