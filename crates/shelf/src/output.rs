//! Terminal output for the CLI.
//!
//! Status messages go to stderr so that `shelf list` output can be piped.

use std::io;

use console::{Style, Term};

/// Writes status messages to stderr and command results to stdout.
pub(crate) struct Output {
    status: Term,
    results: Term,
    error_style: Style,
    note_style: Style,
    banner_style: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
            error_style: Style::new().red(),
            note_style: Style::new().dim(),
            banner_style: Style::new().cyan().bold(),
        }
    }

    /// Plain status line.
    pub(crate) fn info(&self, msg: &str) {
        self.status_line(&Style::new(), msg);
    }

    /// Status line in red.
    pub(crate) fn error(&self, msg: &str) {
        self.status_line(&self.error_style, msg);
    }

    /// Status line in bold cyan, used for the startup banner.
    pub(crate) fn highlight(&self, msg: &str) {
        self.status_line(&self.banner_style, msg);
    }

    /// One result line on stdout.
    pub(crate) fn line(&self, msg: &str) -> io::Result<()> {
        self.results.write_line(msg)
    }

    /// One result line on stdout followed by a dimmed note.
    pub(crate) fn line_with_note(&self, msg: &str, note: &str) -> io::Result<()> {
        let note = self.note_style.apply_to(note);
        self.results.write_line(&format!("{msg}  {note}"))
    }

    // A closed stderr is not worth failing a command over.
    fn status_line(&self, style: &Style, msg: &str) {
        let _ = self.status.write_line(&style.apply_to(msg).to_string());
    }
}
