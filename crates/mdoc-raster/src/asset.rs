//! Script and stylesheet locations for browser pages.

use std::path::{Path, PathBuf};

use crate::RasterError;

/// Where a `JavaScript` library or stylesheet is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Remote `http(s)://` URL.
    Url(String),
    /// Local file, referenced through a `file://` URL.
    File(PathBuf),
}

impl AssetSource {
    /// Classify a configured location.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_owned())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// URL usable in a `src`/`href` attribute.
    pub(crate) fn href(&self) -> Result<String, RasterError> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::File(path) => {
                if !path.is_file() {
                    return Err(RasterError::AssetNotFound(path.clone()));
                }
                let absolute = std::fs::canonicalize(path)?;
                Ok(file_url(&absolute))
            }
        }
    }

    /// `<script>` tag loading this asset.
    pub(crate) fn script_tag(&self) -> Result<String, RasterError> {
        Ok(format!(r#"<script src="{}"></script>"#, self.href()?))
    }

    /// `<link>` tag loading this asset as a stylesheet.
    pub(crate) fn stylesheet_tag(&self) -> Result<String, RasterError> {
        Ok(format!(r#"<link rel="stylesheet" href="{}">"#, self.href()?))
    }
}

/// Build a `file://` URL for an absolute path.
pub(crate) fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let path = path.replace(' ', "%20").replace('"', "%22");
    if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_url() {
        assert_eq!(
            AssetSource::parse("https://cdn.example.com/katex.js"),
            AssetSource::Url("https://cdn.example.com/katex.js".to_owned())
        );
        assert_eq!(
            AssetSource::parse("http://localhost:8000/mermaid.js"),
            AssetSource::Url("http://localhost:8000/mermaid.js".to_owned())
        );
    }

    #[test]
    fn test_parse_file() {
        assert_eq!(
            AssetSource::parse("vendor/mermaid.min.js"),
            AssetSource::File(PathBuf::from("vendor/mermaid.min.js"))
        );
    }

    #[test]
    fn test_url_script_tag() {
        let tag = AssetSource::parse("https://cdn.example.com/m.js")
            .script_tag()
            .unwrap();
        assert_eq!(tag, r#"<script src="https://cdn.example.com/m.js"></script>"#);
    }

    #[test]
    fn test_missing_file_is_error() {
        let source = AssetSource::File(PathBuf::from("/nonexistent/katex.css"));
        let err = source.stylesheet_tag().unwrap_err();
        assert!(matches!(err, RasterError::AssetNotFound(_)));
    }

    #[test]
    fn test_file_url_escapes_spaces() {
        assert_eq!(
            file_url(Path::new("/tmp/my docs/page.html")),
            "file:///tmp/my%20docs/page.html"
        );
    }

    #[test]
    fn test_file_url_windows_path() {
        assert_eq!(
            file_url(Path::new(r"C:\work\page.html")),
            "file:///C:/work/page.html"
        );
    }
}
