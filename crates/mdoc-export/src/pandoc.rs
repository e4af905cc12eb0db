//! pandoc child process.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::ExportError;

/// Default pandoc executable.
pub const DEFAULT_PANDOC: &str = "pandoc";

/// Default output format.
pub const DEFAULT_FORMAT: &str = "docx";

/// HTML to document converter backed by the `pandoc` executable.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: String,
    format: String,
    extra_args: Vec<String>,
}

impl Default for Pandoc {
    fn default() -> Self {
        Self::new(DEFAULT_PANDOC)
    }
}

impl Pandoc {
    /// Use the given executable name or path.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format: DEFAULT_FORMAT.to_owned(),
            extra_args: Vec::new(),
        }
    }

    /// Set the output format (default: `docx`).
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Append extra command-line arguments.
    #[must_use]
    pub fn extra_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Full argument list for converting to `output`.
    fn args(&self, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-f".to_owned(),
            "html".to_owned(),
            "-t".to_owned(),
            self.format.clone(),
            "--standalone".to_owned(),
            "-o".to_owned(),
            output.display().to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Convert `html` into a document at `output`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Spawn`] if pandoc can't be started and
    /// [`ExportError::Failed`] with its stderr if it exits unsuccessfully.
    pub fn convert(&self, html: &str, output: &Path) -> Result<(), ExportError> {
        tracing::debug!(program = %self.program, format = %self.format, output = %output.display(), "Running pandoc");

        let mut child = Command::new(&self.program)
            .args(self.args(output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExportError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdin is fed from its own thread while stderr drains here, so a
        // chatty pandoc can't block on a full pipe.
        let stdin = child.stdin.take();
        let (written, result) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || {
                stdin.map_or(Ok(()), |mut stdin| stdin.write_all(html.as_bytes()))
            });
            let result = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, result)
        });

        // A pandoc that exits early closes the pipe; its status explains why.
        let result = result?;
        if !result.status.success() {
            return Err(ExportError::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }
        written?;
        Ok(())
    }
}
