//! Build progress on stderr.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Progress reporter for the CLI commands.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    pub(crate) fn output_dir(&self, dir: &Path) {
        let _ = self.term.write_line(&format!("Output: {}", dir.display()));
    }

    /// One record rendered to its page path.
    pub(crate) fn page_built(&self, record: &Path, page_path: &str) {
        let _ = self
            .term
            .write_line(&format!("  {} -> {page_path}", record.display()));
    }

    /// A record the stream does not select, or whose path is unusable (yellow).
    pub(crate) fn skipped(&self, record: &Path, reason: &impl Display) {
        let line = format!("Skipped {}: {reason}", record.display());
        let _ = self.term.write_line(&self.yellow.apply_to(line).to_string());
    }

    /// Final count of written pages (green).
    pub(crate) fn summary(&self, built: usize, dir: &Path) {
        let line = format!("Built {built} page(s) to {}", dir.display());
        let _ = self.term.write_line(&self.green.apply_to(line).to_string());
    }

    /// Command failure (red).
    pub(crate) fn failed(&self, err: &impl Display) {
        let line = format!("Error: {err}");
        let _ = self.term.write_line(&self.red.apply_to(line).to_string());
    }
}
