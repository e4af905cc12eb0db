use std::path::PathBuf;

use mdoc_raster::RasterError;

/// Error raised while converting Markdown to HTML.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Rendering a diagram failed.
    #[error("{0}")]
    Raster(#[from] RasterError),
    /// A rendered image could not be saved.
    #[error("failed to write image {}: {source}", path.display())]
    WriteImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
