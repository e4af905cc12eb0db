//! `mdoc md-to-html` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mdoc_config::{CliSettings, Config};
use mdoc_markdown::{ConvertOptions, ImageFiles, ImageOutput, md_to_html};
use mdoc_raster::ChromeSession;

use super::{output_path, raster_config, require_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the md-to-html command.
#[derive(Args)]
pub(crate) struct MdToHtmlArgs {
    /// Input Markdown file.
    input: PathBuf,

    /// Output HTML file (default: input with .html extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title (default: first level-1 heading).
    #[arg(long)]
    title: Option<String>,

    /// Embed images as base64 data URIs instead of writing PNG files.
    #[arg(long)]
    base64: bool,

    /// Chrome/Chromium executable (overrides config).
    #[arg(long, env = "MDOC_CHROME")]
    chrome: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Image directory for file mode: the output file's directory.
fn image_base_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl MdToHtmlArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        require_input(&self.input)?;

        let cli_settings = CliSettings {
            chrome_path: self.chrome,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Configuration loaded");

        let out_path = output_path(&self.input, self.output, "html");
        output.detail("Input", &self.input.display().to_string());
        output.detail("Output", &out_path.display().to_string());

        let images = if self.base64 {
            ImageOutput::Inline
        } else {
            ImageOutput::Files(
                ImageFiles::new(image_base_dir(&out_path))
                    .diagram_dir(config.images.diagram_dir.clone())
                    .equation_dir(config.images.equation_dir.clone()),
            )
        };
        let options = ConvertOptions {
            title: self.title,
            output: images,
        };

        let markdown = std::fs::read_to_string(&self.input)?;
        let mut session = ChromeSession::new(raster_config(&config));
        let result = md_to_html(&markdown, &options, &mut session);
        session.release();

        std::fs::write(&out_path, result?)?;
        output.success(&format!("Created {}", out_path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_base_dir() {
        assert_eq!(image_base_dir(Path::new("out/doc.html")), PathBuf::from("out"));
        assert_eq!(image_base_dir(Path::new("doc.html")), PathBuf::from("."));
    }
}
