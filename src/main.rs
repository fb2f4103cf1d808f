//! MasterQR - QR payloads with passwords and expiry
//!
//! A CLI tool for scanning and generating QR codes carrying structured
//! payloads, optionally protected with password-based encryption and/or a
//! time-based expiry, delivered as self-contained deep links.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{
    CommandExecutor, ContactCommand, GenerateCommand, HistoryCommand, InspectCommand,
    ScanCommand, WifiCommand,
};

/// MasterQR - QR payloads with passwords and expiry
///
/// Scan and generate QR codes carrying text, Wi-Fi credentials, contact
/// cards, or links - optionally encrypted with a password and/or expiring at
/// a deadline. Protected payloads travel as normal-looking deep links that
/// any QR reader can open.
#[derive(Parser)]
#[command(name = "masterqr")]
#[command(version = "0.1.0")]
#[command(about = "Scan and generate QR codes with encrypted, expiring payloads")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a QR code from text, optionally encrypted and expiring
    Generate(GenerateCommand),

    /// Generate a Wi-Fi network QR code
    Wifi(WifiCommand),

    /// Generate a contact card (vCard) QR code
    Contact(ContactCommand),

    /// Scan a QR code from an image file
    Scan(ScanCommand),

    /// Inspect a payload string without an image
    Inspect(InspectCommand),

    /// Show or clear the scan/generation history
    History(HistoryCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(cmd) => cmd.execute(),
        Commands::Wifi(cmd) => cmd.execute(),
        Commands::Contact(cmd) => cmd.execute(),
        Commands::Scan(cmd) => cmd.execute(),
        Commands::Inspect(cmd) => cmd.execute(),
        Commands::History(cmd) => cmd.execute(),
    }
}
