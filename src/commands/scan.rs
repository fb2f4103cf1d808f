//! QR image scanning command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use masterqr::payload::parse_payload_with_config;
use masterqr::qr::read_qr_from_file;
use masterqr::{HistoryStore, QrMeta, Source};

use super::{link_config, print_content, CommandExecutor};

/// Scan a QR code from an image file.
///
/// Decodes the image, detects whether the content is a payload deep link,
/// and evaluates expiry and protection. An expired payload is inaccessible
/// regardless of the password. A wrong password is a recoverable failure:
/// re-run with another one.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Image file containing the QR code
    pub image: PathBuf,

    /// Password to unlock a protected payload
    #[arg(short, long)]
    pub password: Option<String>,

    /// Deep-link base URL override (for detection)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Do not record the scan in history
    #[arg(long)]
    pub no_history: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for ScanCommand {
    fn execute(&self) -> Result<()> {
        let decoded = read_qr_from_file(&self.image)
            .with_context(|| format!("Failed to read QR code from {}", self.image.display()))?;

        if self.verbose {
            eprintln!("Decoded {} characters", decoded.len());
        }

        let config = link_config(&self.base_url);
        let parsed = parse_payload_with_config(&decoded, &config);

        // Recorded in wrapped form, before any unlock
        if !self.no_history {
            let mut store = HistoryStore::load().context("Failed to load history")?;
            store.record(&decoded, Source::Scan, QrMeta::default());
            store.save().context("Failed to save history")?;
        }

        if parsed.is_expired {
            println!("This code has expired.");
            return Ok(());
        }

        let content = if parsed.is_encrypted {
            match &self.password {
                Some(password) => match parsed.unlock(password) {
                    Some(plain) => plain,
                    None => anyhow::bail!("Wrong password or corrupted data"),
                },
                None => {
                    println!("Type: crypto (locked)");
                    println!("This payload is password protected. Re-run with --password to unlock.");
                    return Ok(());
                }
            }
        } else {
            parsed.data.clone()
        };

        print_content(&content);
        Ok(())
    }
}
