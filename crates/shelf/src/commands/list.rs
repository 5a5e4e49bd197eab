//! `shelf list`: print the reading order.

use clap::Args;
use shelf_config::CliSettings;
use shelf_tree::{TreeSnapshot, TutorialEntry};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print the sequence as JSON.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    /// Print every tutorial with its folder trail, or the sequence as JSON.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(CliSettings::default())?;
        let root = &config.tutorials.root;
        if !root.is_dir() {
            output.info(&format!("Tutorials directory not found: {}", root.display()));
        }

        let snapshot = TreeSnapshot::scan(root);
        tracing::debug!(root = %root.display(), pages = snapshot.sequence.len(), "Scanned tutorials");

        if self.json {
            output.line(&serde_json::to_string_pretty(&snapshot.sequence)?)?;
            return Ok(());
        }

        for (page, folders) in listing_lines(&snapshot.sequence) {
            if folders.is_empty() {
                output.line(&page)?;
            } else {
                output.line_with_note(&page, &folders)?;
            }
        }
        output.info(&format!("{} tutorial(s)", snapshot.sequence.len()));

        Ok(())
    }
}

/// Page path and folder trail for each tutorial.
fn listing_lines(sequence: &[TutorialEntry]) -> Vec<(String, String)> {
    sequence
        .iter()
        .map(|entry| (entry.page.clone(), entry.folder_path()))
        .collect()
}
