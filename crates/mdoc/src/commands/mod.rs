//! CLI command implementations.

pub(crate) mod html_to_doc;
pub(crate) mod md_to_doc;
pub(crate) mod md_to_html;

use std::path::{Path, PathBuf};

use mdoc_config::Config;
use mdoc_export::Pandoc;
use mdoc_raster::{AssetSource, RasterConfig};

use crate::error::CliError;

pub(crate) use html_to_doc::HtmlToDocArgs;
pub(crate) use md_to_doc::MdToDocArgs;
pub(crate) use md_to_html::MdToHtmlArgs;

/// Fail with [`CliError::InputNotFound`] unless `input` is a file.
fn require_input(input: &Path) -> Result<(), CliError> {
    if input.is_file() {
        Ok(())
    } else {
        Err(CliError::InputNotFound(input.to_path_buf()))
    }
}

/// `output` if given, otherwise `input` with the extension replaced.
fn output_path(input: &Path, output: Option<PathBuf>, extension: &str) -> PathBuf {
    output.unwrap_or_else(|| input.with_extension(extension))
}

/// Browser settings from the loaded configuration.
fn raster_config(config: &Config) -> RasterConfig {
    let render = &config.render_resolved;
    RasterConfig::default()
        .chrome_path(render.chrome_path.clone())
        .diagram_timeout(render.diagram_timeout)
        .math_timeout(render.math_timeout)
        .mermaid_theme(render.mermaid_theme.clone())
        .mermaid_script(AssetSource::parse(&render.mermaid_script))
        .katex_script(AssetSource::parse(&render.katex_script))
        .katex_stylesheet(AssetSource::parse(&render.katex_stylesheet))
}

/// pandoc invocation from the loaded configuration.
fn pandoc(config: &Config) -> Pandoc {
    Pandoc::new(config.export.pandoc_path.clone())
        .format(config.export.format.clone())
        .extra_args(config.export.extra_args.iter().cloned())
}
