//! Payload string inspection command.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use masterqr::payload::parse_payload_with_config;

use super::{link_config, print_content, CommandExecutor};

/// Inspect a payload string without an image.
///
/// Runs the same detection, expiry, and unlock pipeline as `scan`, taking the
/// string directly. Nothing is recorded in history.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// The string to inspect (reads from stdin if not provided)
    pub text: Option<String>,

    /// Password to unlock a protected payload
    #[arg(short, long)]
    pub password: Option<String>,

    /// Deep-link base URL override (for detection)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self) -> Result<()> {
        let text = match &self.text {
            Some(t) => t.clone(),
            None => {
                eprintln!("Reading payload from stdin (Ctrl+D to finish):");
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read payload from stdin")?;
                buffer.trim().to_string()
            }
        };

        if text.is_empty() {
            anyhow::bail!("Payload cannot be empty");
        }

        let config = link_config(&self.base_url);
        let parsed = parse_payload_with_config(&text, &config);

        if self.verbose {
            eprintln!("Deep link: {}", parsed.data != parsed.raw);
            eprintln!("Encrypted: {}", parsed.is_encrypted);
            if let Some(deadline) = parsed.expires_at {
                eprintln!("Expires at: {} (epoch ms)", deadline);
            }
        }

        if parsed.is_expired {
            println!("This payload has expired.");
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
