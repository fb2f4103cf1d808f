//! Content classification for decoded payloads.
//!
//! Assigns a semantic [`ScanType`] to unwrapped content by ordered prefix and
//! pattern inspection. Classification must run on the decrypted/unwrapped
//! data: while a payload is still sealed the only meaningful answer is
//! [`ScanType::Crypto`], so an encrypted Wi-Fi payload is tagged `crypto`,
//! not `wifi`, until unlocked.

mod vcard;
mod wifi;

pub use vcard::{parse_vcard, ContactCard};
pub use wifi::{parse_wifi, WifiNetwork};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payload::is_wrapped;

/// Semantic kind assigned to decoded content. Exactly one tag per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Text,
    Url,
    Wifi,
    Vcard,
    Audio,
    Crypto,
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ScanType::Text => "text",
            ScanType::Url => "url",
            ScanType::Wifi => "wifi",
            ScanType::Vcard => "vcard",
            ScanType::Audio => "audio",
            ScanType::Crypto => "crypto",
        };
        f.write_str(tag)
    }
}

/// Hostname substrings identifying known audio-hosting services.
const AUDIO_HOST_MARKERS: &[&str] = &["firebasestorage", "sounds/v1"];

/// File extensions identifying a direct audio link.
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".ogg"];

/// Classifies content by ordered rule evaluation, first match wins.
///
/// Ordering: the envelope marker and the Wi-Fi / vCard prefixes are anchored
/// and unambiguous, so they go first. The audio heuristic is fuzzy (hostname
/// substring matching) and sits after the structural checks to limit false
/// positives, but before the broad `http` catch-all so audio links get a
/// playback surface instead of a generic URL one. Everything else is text.
pub fn classify(content: &str) -> ScanType {
    if is_wrapped(content) {
        return ScanType::Crypto;
    }
    if content.starts_with("WIFI:") {
        return ScanType::Wifi;
    }
    if starts_with_ignore_case(content, "BEGIN:VCARD") {
        return ScanType::Vcard;
    }

    let lower = content.to_lowercase();
    if AUDIO_HOST_MARKERS.iter().any(|marker| lower.contains(marker))
        || AUDIO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    {
        return ScanType::Audio;
    }

    if content.starts_with("http") {
        return ScanType::Url;
    }

    ScanType::Text
}

/// ASCII case-insensitive anchored prefix check.
///
/// Byte-level so it cannot land mid-codepoint on non-ASCII input.
pub(crate) fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    let s = s.as_bytes();
    let prefix = prefix.as_bytes();
    s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}
