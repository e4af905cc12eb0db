//! `mdoc md-to-doc` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdoc_config::{CliSettings, Config};
use mdoc_export::md_to_doc;
use mdoc_raster::ChromeSession;

use super::{output_path, pandoc, raster_config, require_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the md-to-doc command.
#[derive(Args)]
pub(crate) struct MdToDocArgs {
    /// Input Markdown file.
    input: PathBuf,

    /// Output document (default: input with .docx extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title (default: first level-1 heading).
    #[arg(long)]
    title: Option<String>,

    /// Chrome/Chromium executable (overrides config).
    #[arg(long, env = "MDOC_CHROME")]
    chrome: Option<PathBuf>,

    /// pandoc executable (overrides config).
    #[arg(long, env = "MDOC_PANDOC")]
    pandoc: Option<String>,

    /// Path to configuration file (default: auto-discover mdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl MdToDocArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        require_input(&self.input)?;

        let cli_settings = CliSettings {
            chrome_path: self.chrome,
            pandoc_path: self.pandoc,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Configuration loaded");

        let out_path = output_path(&self.input, self.output, "docx");
        output.detail("Input", &self.input.display().to_string());
        output.detail("Output", &out_path.display().to_string());

        let mut session = ChromeSession::new(raster_config(&config));
        let result = md_to_doc(
            &self.input,
            &out_path,
            self.title.as_deref(),
            &mut session,
            &pandoc(&config),
        );
        session.release();
        result?;

        output.success(&format!("Created {}", out_path.display()));
        Ok(())
    }
}
