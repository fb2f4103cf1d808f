//! Text payload generation command.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use masterqr::{HistoryStore, QrMeta, Source};

use super::{emit_qr, resolve_payload, CommandExecutor};

/// Generate a QR code from text, optionally encrypted and expiring.
///
/// Plain text is encoded as-is. A password or an expiry turns the payload
/// into a deep link pointing at the application origin, scannable by any
/// generic QR reader.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Text content to encode (reads from stdin if not provided)
    pub text: Option<String>,

    /// Password protecting the payload (content travels encrypted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Relative expiry: "+30m", "+24h", "+7d", "+1w"
    #[arg(long)]
    pub expires: Option<String>,

    /// Wrap in a deep link even without password or expiry
    #[arg(long)]
    pub link: bool,

    /// Deep-link base URL override
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output file path (PNG, SVG, or TXT for ASCII); prints ASCII art
    /// to the terminal when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// QR foreground color as "#rrggbb"
    #[arg(long, default_value = "#000000")]
    pub color: String,

    /// Center overlay icon (PNG) composited onto the code
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Output format: png (default), svg, or ascii
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Do not record the generation in history
    #[arg(long)]
    pub no_history: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for GenerateCommand {
    fn execute(&self) -> Result<()> {
        let text = match &self.text {
            Some(t) => t.clone(),
            None => {
                eprintln!("Reading content from stdin (Ctrl+D to finish):");
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read content from stdin")?;
                buffer.trim().to_string()
            }
        };

        if text.is_empty() {
            anyhow::bail!("Content cannot be empty");
        }

        if self.password.as_deref() == Some("") {
            anyhow::bail!("Password cannot be empty when protection is requested");
        }

        let payload = resolve_payload(
            &text,
            &self.password,
            &self.expires,
            self.link,
            &self.base_url,
            self.verbose,
        )?;

        emit_qr(&payload, &self.output, &self.color, &self.format, &self.overlay)?;
        println!("Payload: {}", payload);

        if !self.no_history {
            let mut store = HistoryStore::load().context("Failed to load history")?;
            store.record(
                &payload,
                Source::Generate,
                QrMeta {
                    color: Some(self.color.clone()),
                },
            );
            store.save().context("Failed to save history")?;
        }

        Ok(())
    }
}
