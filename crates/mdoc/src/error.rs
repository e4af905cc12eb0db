//! CLI error types.

use std::path::PathBuf;

use mdoc_config::ConfigError;
use mdoc_export::ExportError;
use mdoc_markdown::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Export(#[from] ExportError),
}
