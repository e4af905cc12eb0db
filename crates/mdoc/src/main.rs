//! mdoc CLI - Markdown and HTML to DOCX converter.
//!
//! Provides commands for:
//! - `md-to-html`: Render Markdown to HTML with diagrams and equations as PNG images
//! - `html-to-doc`: Convert an HTML file to DOCX (or another pandoc format)
//! - `md-to-doc`: Convert Markdown straight to DOCX with embedded images

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{HtmlToDocArgs, MdToDocArgs, MdToHtmlArgs};
use output::Output;

/// mdoc - Markdown and HTML to DOCX converter.
#[derive(Parser)]
#[command(name = "mdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown to HTML, rendering Mermaid and LaTeX as PNG images.
    MdToHtml(MdToHtmlArgs),
    /// Convert HTML to DOCX, embedding local images.
    HtmlToDoc(HtmlToDocArgs),
    /// Convert Markdown to DOCX in one step.
    MdToDoc(MdToDocArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::MdToHtml(args) => args.verbose,
            Self::HtmlToDoc(args) => args.verbose,
            Self::MdToDoc(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(cli.command.verbose(), rust_log.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::MdToHtml(args) => args.execute(),
        Commands::HtmlToDoc(args) => args.execute(),
        Commands::MdToDoc(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise `RUST_LOG` or WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(false, Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(
            log_filter(false, Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_log_filter_verbose_wins() {
        assert_eq!(
            log_filter(true, Some("error")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
