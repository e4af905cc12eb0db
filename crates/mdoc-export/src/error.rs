use std::path::PathBuf;

use mdoc_markdown::ConvertError;

/// Error raised while exporting a document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The converter executable could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The converter exited with a failure status.
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    /// Reading the input document failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// I/O error while talking to the converter.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Markdown conversion failed.
    #[error("{0}")]
    Convert(#[from] ConvertError),
}
