use std::path::PathBuf;
use std::time::Duration;

/// Error raised by a rasterizer.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The browser process could not be started.
    #[error("failed to launch browser: {0}")]
    Launch(String),
    /// A `DevTools` call failed.
    #[error("browser error: {0}")]
    Browser(String),
    /// The diagram SVG did not appear in time.
    #[error("diagram was not rendered within {} ms", .0.as_millis())]
    Timeout(Duration),
    /// Element screenshot failed.
    #[error("failed to capture screenshot: {0}")]
    Capture(String),
    /// A local script or stylesheet does not exist.
    #[error("asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),
    /// Writing a browser page to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
