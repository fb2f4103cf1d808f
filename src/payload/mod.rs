//! Payload envelope construction, detection, and parsing.
//!
//! A payload is the logical content a QR code carries, independent of whether
//! it is wrapped in a deep link or encrypted. This module provides:
//! - [`envelope`]: the `MASTERQR:ENC:` marker codec and seal/open helpers
//! - [`builder`]: raw data + optional password + optional expiry → deep link
//! - [`parser`]: arbitrary scanned string → [`PayloadData`]
//!
//! Data flow: scanned string → parser (strips the deep-link wrapper, detects
//! expiry and encryption) → optional unlock with a password → content
//! classification. In reverse: user content → builder (seals if requested,
//! embeds expiry) → string handed to the QR renderer.

mod builder;
mod envelope;
mod parser;

pub use builder::{
    build_payload_url, build_payload_url_at, build_payload_url_with_config, LinkConfig,
    PayloadError,
};
pub use envelope::{is_wrapped, open, seal, strip, wrap};
pub use parser::{
    parse_payload, parse_payload_at, parse_payload_with_config, Payload, PayloadData,
};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in epoch milliseconds.
///
/// The `*_at` builder/parser variants take the clock as a parameter instead,
/// which is what makes the expiry boundary deterministic under test.
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
