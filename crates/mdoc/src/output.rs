//! Colored terminal output on stderr.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print a secondary detail line (dimmed).
    pub(crate) fn detail(&self, label: &str, value: &str) {
        let line = format!("{} {value}", self.dim.apply_to(format!("{label}:")));
        let _ = self.term.write_line(&line);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
