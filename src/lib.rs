//! # MasterQR - QR payloads with passwords and expiry
//!
//! MasterQR scans and generates QR codes carrying structured payloads
//! (plain text, URLs, Wi-Fi credentials, contact cards, voice-message links),
//! optionally protected with password-based encryption and/or an absolute
//! expiry deadline, delivered as a self-contained deep link.
//!
//! ## Overview
//!
//! The payload travels as a single opaque string, so everything is built on
//! string-level codecs:
//! - Encrypted content is wrapped in a marker envelope: `MASTERQR:ENC:<ciphertext>`
//! - Protected or expiring content is embedded in a deep link:
//!   `https://masterqr.app/?d=<data>[&exp=<epoch-ms>]`
//! - Any QR reader can scan the link; a peer that doesn't know the format
//!   still sees a normal URL
//! - Parsing detects the deep link, extracts the data, and evaluates the
//!   encryption and expiry state before any content inspection
//!
//! ## Security Model
//!
//! - **Password-only protection**: HKDF-SHA256 key derivation and
//!   ChaCha20-Poly1305 authenticated encryption; the ciphertext string is
//!   self-contained (nonce embedded), only the password is needed to reverse it
//! - **Fails closed**: wrong password or corrupted ciphertext yields `None`,
//!   never garbage text
//! - **Expiry is re-evaluated**: `is_expired` is computed against the clock at
//!   every parse, never cached
//! - **History stores wrapped text**: re-opening a protected item always
//!   re-prompts for the password
//!
//! ## Example Usage
//!
//! ```rust
//! use masterqr::{build_payload_url, classify, parse_payload, ScanType};
//!
//! // Build a protected deep link
//! let url = build_payload_url("wifi at home", "hunter2", None).unwrap();
//!
//! // Scanning it back: still locked, so it classifies as crypto
//! let parsed = parse_payload(&url);
//! assert!(parsed.is_encrypted);
//! assert_eq!(classify(&parsed.data), ScanType::Crypto);
//!
//! // Unlock with the password
//! let plain = parsed.unlock("hunter2").unwrap();
//! assert_eq!(plain, "wifi at home");
//! assert_eq!(classify(&plain), ScanType::Text);
//! ```
//!
//! ## Modules
//!
//! - [`crypto`]: Password-based symmetric encryption
//! - [`payload`]: Envelope codec, deep-link builder and parser
//! - [`content`]: Content classifier and Wi-Fi / vCard field extraction
//! - [`qr`]: QR code rendering and reading
//! - [`history`]: Persisted scan/generation history

/// Marker prefix identifying encrypted payload content.
///
/// Byte-exact and case-sensitive; the ciphertext follows with no separator.
pub const ENVELOPE_PREFIX: &str = "MASTERQR:ENC:";

/// Default origin + path used for deep links.
pub const DEFAULT_BASE_URL: &str = "https://masterqr.app/";

pub mod content;
pub mod crypto;
pub mod history;
pub mod payload;
pub mod qr;

// Re-export commonly used types at the crate root
pub use content::{classify, parse_vcard, parse_wifi, ContactCard, ScanType, WifiNetwork};
pub use crypto::{decrypt_text, encrypt_text, SymmetricError};
pub use history::{HistoryError, HistoryItem, HistoryStore, QrMeta, Source};
pub use payload::{
    build_payload_url, build_payload_url_at, build_payload_url_with_config, parse_payload,
    parse_payload_at, parse_payload_with_config, LinkConfig, Payload, PayloadData, PayloadError,
};
pub use qr::{read_qr, read_qr_from_file, render, render_to_file, QrConfig, QrError, QrFormat, QrOutput};
