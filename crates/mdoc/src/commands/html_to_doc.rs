//! `mdoc html-to-doc` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdoc_config::{CliSettings, Config};
use mdoc_export::html_to_doc;

use super::{output_path, pandoc, require_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the html-to-doc command.
#[derive(Args)]
pub(crate) struct HtmlToDocArgs {
    /// Input HTML file.
    input: PathBuf,

    /// Output document (default: input with .docx extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

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

impl HtmlToDocArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        require_input(&self.input)?;

        let cli_settings = CliSettings {
            pandoc_path: self.pandoc,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Configuration loaded");

        let out_path = output_path(&self.input, self.output, "docx");
        output.detail("Input", &self.input.display().to_string());
        output.detail("Output", &out_path.display().to_string());

        html_to_doc(&self.input, &out_path, &pandoc(&config))?;

        output.success(&format!("Created {}", out_path.display()));
        Ok(())
    }
}
