//! Terminal output: status messages on stderr, results on stdout.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    status: Term,
    results: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.status.write_line(msg);
    }

    /// Print a secondary message (dimmed).
    pub(crate) fn detail(&self, msg: &str) {
        let _ = self.status.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.status.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.status.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.status.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Write uncolored text to stdout.
    pub(crate) fn result(&self, text: &str) -> std::io::Result<()> {
        self.results.write_line(text)
    }
}
