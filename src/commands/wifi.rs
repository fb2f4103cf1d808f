//! Wi-Fi payload generation command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use masterqr::{HistoryStore, QrMeta, Source, WifiNetwork};

use super::{emit_qr, resolve_payload, CommandExecutor};

/// Generate a Wi-Fi network QR code.
///
/// Produces the standard `WIFI:T:..;S:..;P:..;;` payload. Note that `;` and
/// `:` inside the SSID or password are not escaped by the wire format.
#[derive(Args, Debug)]
pub struct WifiCommand {
    /// Network name
    #[arg(short, long)]
    pub ssid: String,

    /// Network password (omit for an open network)
    #[arg(short, long, default_value = "")]
    pub password: String,

    /// Authentication type
    #[arg(short, long, default_value = "WPA", value_parser = ["WPA", "WEP", "nopass"])]
    pub auth: String,

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

impl CommandExecutor for WifiCommand {
    fn execute(&self) -> Result<()> {
        if self.ssid.is_empty() {
            anyhow::bail!("SSID cannot be empty");
        }

        if self.protect.as_deref() == Some("") {
            anyhow::bail!("Password cannot be empty when protection is requested");
        }

        let network = if self.password.is_empty() {
            WifiNetwork::open(&self.ssid)
        } else {
            WifiNetwork::protected(&self.ssid, &self.password, &self.auth)
        };

        let wire = network.to_payload();
        if self.verbose {
            eprintln!("Wi-Fi payload: {}", wire);
        }

        let payload = resolve_payload(
            &wire,
            &self.protect,
            &self.expires,
            false,
            &self.base_url,
            self.verbose,
        )?;

        emit_qr(&payload, &self.output, &self.color, &self.format, &None)?;
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
