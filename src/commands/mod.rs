//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.
//! This provides clean separation of concerns and makes adding new commands easy.

mod contact;
mod generate;
mod history;
mod inspect;
mod scan;
mod wifi;

pub use contact::ContactCommand;
pub use generate::GenerateCommand;
pub use history::HistoryCommand;
pub use inspect::InspectCommand;
pub use scan::ScanCommand;
pub use wifi::WifiCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};

use masterqr::payload::{build_payload_url_with_config, LinkConfig};
use masterqr::qr::{render, render_to_file, QrConfig, QrFormat};
use masterqr::{classify, parse_vcard, parse_wifi, ScanType};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Parses a relative expiry like "+30m", "+24h", "+7d", "+1w" into a
/// duration in milliseconds.
pub(crate) fn parse_expiry_ms(expires: &str) -> Option<u64> {
    let expires = expires.trim();
    let rest = expires.strip_prefix('+')?;
    let suffix = rest.chars().last()?;
    let value: u64 = rest[..rest.len() - suffix.len_utf8()].parse().ok()?;

    let seconds = match suffix {
        'm' => value * 60,
        'h' => value * 60 * 60,
        'd' => value * 60 * 60 * 24,
        'w' => value * 60 * 60 * 24 * 7,
        _ => return None,
    };

    Some(seconds * 1000)
}

/// Endpoint configuration from an optional `--base-url` override.
pub(crate) fn link_config(base_url: &Option<String>) -> LinkConfig {
    match base_url {
        Some(base) => LinkConfig::new(base),
        None => LinkConfig::default(),
    }
}

/// Applies protection and expiry to raw content.
///
/// Returns the content unchanged when no password, expiry, or explicit
/// `--link` was requested; otherwise builds the deep-link payload URL.
pub(crate) fn resolve_payload(
    data: &str,
    password: &Option<String>,
    expires: &Option<String>,
    force_link: bool,
    base_url: &Option<String>,
    verbose: bool,
) -> Result<String> {
    let password = password.as_deref().unwrap_or("");

    let expires_in = match expires {
        Some(value) => Some(parse_expiry_ms(value).with_context(|| {
            format!(
                "Invalid expiry format: '{}'. Use '+30m', '+24h', '+7d', or '+1w'",
                value
            )
        })?),
        None => None,
    };

    if password.is_empty() && expires_in.is_none() && !force_link {
        return Ok(data.to_string());
    }

    let config = link_config(base_url);
    let url = build_payload_url_with_config(data, password, expires_in, &config)
        .context("Failed to build payload link")?;

    if verbose {
        if !password.is_empty() {
            eprintln!("Payload sealed with password");
        }
        if let Some(ms) = expires_in {
            eprintln!("Payload expires in {}m", ms / 60_000);
        }
        eprintln!("Deep link: {} characters", url.len());
    }

    Ok(url)
}

/// Renders the payload to `output`, or as ASCII art to stdout when no output
/// path was given.
pub(crate) fn emit_qr(
    payload: &str,
    output: &Option<PathBuf>,
    color: &str,
    format: &str,
    overlay: &Option<PathBuf>,
) -> Result<()> {
    let qr_format = match format.to_lowercase().as_str() {
        "png" => QrFormat::Png,
        "svg" => QrFormat::Svg,
        "ascii" | "txt" => QrFormat::Ascii,
        _ => anyhow::bail!("Unknown format: {}. Use: png, svg, or ascii", format),
    };

    match output {
        Some(path) => {
            let config = QrConfig {
                format: qr_format,
                fg_color: color.to_string(),
                overlay: overlay.clone(),
                ..Default::default()
            };
            render_to_file(payload, path, &config).context("Failed to render QR code")?;
            println!("QR code saved: {}", path.display());
        }
        None => {
            let config = QrConfig {
                format: QrFormat::Ascii,
                fg_color: color.to_string(),
                ..Default::default()
            };
            let rendered = render(payload, &config).context("Failed to render QR code")?;
            if let Some(ascii) = rendered.as_string() {
                println!("{}", ascii);
            }
        }
    }

    Ok(())
}

/// Prints classified content with its extracted fields.
pub(crate) fn print_content(content: &str) {
    match classify(content) {
        ScanType::Wifi => {
            println!("Type: wifi");
            if let Some(network) = parse_wifi(content) {
                println!("  SSID: {}", network.ssid);
                if !network.password.is_empty() {
                    println!("  Password: {}", network.password);
                }
                println!("  Auth: {}", network.auth);
            }
        }
        ScanType::Vcard => {
            println!("Type: vcard");
            if let Some(card) = parse_vcard(content) {
                println!("  Name: {}", card.full_name);
                if !card.tel.is_empty() {
                    println!("  Phone: {}", card.tel);
                }
                if !card.email.is_empty() {
                    println!("  Email: {}", card.email);
                }
                if !card.org.is_empty() {
                    println!("  Org: {}", card.org);
                }
            }
        }
        ScanType::Url => {
            if content.starts_with("https://") {
                println!("Type: url (secure)");
            } else {
                println!("Type: url (not secure)");
            }
            println!("  {}", content);
        }
        ScanType::Audio => {
            println!("Type: audio");
            println!("  {}", content);
        }
        ScanType::Crypto => {
            println!("Type: crypto (locked)");
        }
        ScanType::Text => {
            println!("Type: text");
            println!("  {}", content);
        }
    }
}
