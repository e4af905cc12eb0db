//! Output mode for rendered images.
//!
//! - [`Inline`](ImageOutput::Inline): `data:` URIs, nothing written (default)
//! - [`Files`](ImageOutput::Files): PNG files next to the output document

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::ConvertError;

/// Default directory for diagram images.
pub const DEFAULT_DIAGRAM_DIR: &str = "mermaid_diagrams";

/// Default directory for equation images.
pub const DEFAULT_EQUATION_DIR: &str = "latex_equations";

/// Encode PNG bytes as a `data:image/png;base64,...` URI.
#[must_use]
pub fn png_to_base64(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Read a PNG file and encode it as a data URI.
pub fn png_file_to_base64(path: &Path) -> std::io::Result<String> {
    Ok(png_to_base64(&std::fs::read(path)?))
}

/// Where rendered images are written in file mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFiles {
    /// Directory of the output document; image directories are below it.
    pub base_dir: PathBuf,
    /// Relative directory for diagram images.
    pub diagram_dir: String,
    /// Relative directory for equation images.
    pub equation_dir: String,
}

impl ImageFiles {
    /// Write images below `base_dir` using the default directory names.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            diagram_dir: DEFAULT_DIAGRAM_DIR.to_owned(),
            equation_dir: DEFAULT_EQUATION_DIR.to_owned(),
        }
    }

    /// Set the diagram directory.
    #[must_use]
    pub fn diagram_dir(mut self, dir: impl Into<String>) -> Self {
        self.diagram_dir = dir.into();
        self
    }

    /// Set the equation directory.
    #[must_use]
    pub fn equation_dir(mut self, dir: impl Into<String>) -> Self {
        self.equation_dir = dir.into();
        self
    }
}

/// Image kind, selecting the directory in file mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImageKind {
    Diagram,
    Equation,
}

/// Output mode for rendered images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageOutput {
    /// Embed images as base64 data URIs (default).
    #[default]
    Inline,
    /// Save images as PNG files and reference them by relative path.
    Files(ImageFiles),
}

impl ImageOutput {
    /// Store `png` and return the value for the `src` attribute.
    pub(crate) fn store(
        &self,
        png: &[u8],
        kind: ImageKind,
        file_name: &str,
    ) -> Result<String, ConvertError> {
        let files = match self {
            Self::Inline => return Ok(png_to_base64(png)),
            Self::Files(files) => files,
        };

        let dir = match kind {
            ImageKind::Diagram => &files.diagram_dir,
            ImageKind::Equation => &files.equation_dir,
        };
        let target_dir = files.base_dir.join(dir);
        let path = target_dir.join(file_name);

        std::fs::create_dir_all(&target_dir)
            .and_then(|()| std::fs::write(&path, png))
            .map_err(|source| ConvertError::WriteImage {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "Image written");

        let prefix = dir.replace('\\', "/");
        Ok(format!("{}/{file_name}", prefix.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    #[test]
    fn test_png_to_base64() {
        assert_eq!(png_to_base64(b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_png_file_to_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        std::fs::write(&path, b"abc").unwrap();

        assert_eq!(png_file_to_base64(&path).unwrap(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_inline_writes_nothing() {
        let src = ImageOutput::Inline
            .store(PNG, ImageKind::Diagram, "diagram_001.png")
            .unwrap();
        assert!(src.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_files_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = ImageOutput::Files(ImageFiles::new(dir.path()));

        let src = output
            .store(PNG, ImageKind::Equation, "eq_inline_001.png")
            .unwrap();

        assert_eq!(src, "latex_equations/eq_inline_001.png");
        let written = std::fs::read(dir.path().join("latex_equations/eq_inline_001.png")).unwrap();
        assert_eq!(written, PNG);
    }

    #[test]
    fn test_files_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let output = ImageOutput::Files(ImageFiles::new(dir.path()).diagram_dir("img/diagrams/"));
        let target = dir.path().join("img/diagrams");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("diagram_001.png"), b"old").unwrap();

        let src = output.store(PNG, ImageKind::Diagram, "diagram_001.png").unwrap();

        assert_eq!(src, "img/diagrams/diagram_001.png");
        assert_eq!(std::fs::read(target.join("diagram_001.png")).unwrap(), PNG);
    }
}
