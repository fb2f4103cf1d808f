//! History listing and clearing command.

use anyhow::{Context, Result};
use clap::Args;

use masterqr::parse_payload;
use masterqr::HistoryStore;

use super::CommandExecutor;

/// Show or clear the scan/generation history.
///
/// Expiry is re-evaluated against the current clock on every listing, so a
/// previously-valid link correctly shows as expired without a re-scan.
#[derive(Args, Debug)]
pub struct HistoryCommand {
    /// Remove all history entries
    #[arg(long)]
    pub clear: bool,

    /// Maximum number of entries to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl CommandExecutor for HistoryCommand {
    fn execute(&self) -> Result<()> {
        let mut store = HistoryStore::load().context("Failed to load history")?;

        if self.clear {
            let removed = store.len();
            store.clear();
            store.save().context("Failed to save history")?;
            println!("Cleared {} entries", removed);
            return Ok(());
        }

        if store.is_empty() {
            println!("History is empty");
            return Ok(());
        }

        let limit = self.limit.unwrap_or(store.len());
        for item in store.items.iter().take(limit) {
            // Fresh expiry evaluation at view time
            let expired = parse_payload(&item.text).is_expired;

            let source = match item.source {
                masterqr::Source::Scan => "scan",
                masterqr::Source::Generate => "generate",
            };

            let mut line = format!("[{}] {} ({})", item.scan_type, preview(&item.text), source);
            if expired {
                line.push_str(" [expired]");
            }
            println!("{}", line);
        }

        Ok(())
    }
}

/// Truncated single-line preview of a payload text.
fn preview(text: &str) -> String {
    const MAX: usize = 60;
    let flat: String = text.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
    if flat.chars().count() <= MAX {
        flat
    } else {
        let cut: String = flat.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(100);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 63);
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(preview("BEGIN:VCARD\nFN:Jo"), "BEGIN:VCARD FN:Jo");
    }
}
