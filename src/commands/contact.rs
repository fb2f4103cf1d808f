//! Contact card (vCard) generation command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use masterqr::{ContactCard, HistoryStore, QrMeta, Source};

use super::{emit_qr, resolve_payload, CommandExecutor};

/// Generate a contact card (vCard) QR code.
#[derive(Args, Debug)]
pub struct ContactCommand {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Organization
    #[arg(long, default_value = "")]
    pub org: String,

    /// Password protecting the whole payload (travels encrypted as a deep link)
    #[arg(long)]
    pub protect: Option<String>,

    /// Relative expiry: "+30m", "+24h", "+7d", "+1w"
    #[arg(long)]
    pub expires: Option<String>,

    /// Deep-link base URL override
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output file path; prints ASCII art to the terminal when omitted
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

impl CommandExecutor for ContactCommand {
    fn execute(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Name cannot be empty");
        }

        if self.protect.as_deref() == Some("") {
            anyhow::bail!("Password cannot be empty when protection is requested");
        }

        let card = ContactCard {
            full_name: self.name.clone(),
            tel: self.phone.clone(),
            email: self.email.clone(),
            org: self.org.clone(),
        };

        let wire = card.to_payload();
        if self.verbose {
            eprintln!("vCard payload: {} characters", wire.len());
        }

        let payload = resolve_payload(
            &wire,
            &self.protect,
            &self.expires,
            false,
            &self.base_url,
            self.verbose,
        )?;

        emit_qr(&payload, &self.output, &self.color, &self.format, &self.overlay)?;
        println!("Payload: {}", payload);

        if !self.no_history {
            let mut store = HistoryStore::load()?;
            store.record(
                &payload,
                Source::Generate,
                QrMeta {
                    color: Some(self.color.clone()),
                },
            );
            store.save()?;
        }

        Ok(())
    }
}
