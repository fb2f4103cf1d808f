//! Deep-link payload builder.
//!
//! Given raw data, an optional password, and an optional expiry duration,
//! produces a fully-qualified URL with query parameters `d` (the data,
//! percent-encoded, sealed first when a password is given) and `exp` (an
//! absolute expiry deadline in epoch milliseconds). The returned string is
//! itself a valid scannable URL: any generic QR reader that opens it lands on
//! the application's own origin.

use thiserror::Error;

use super::{envelope, now_ms};
use crate::crypto::SymmetricError;
use crate::DEFAULT_BASE_URL;

/// Errors that can occur while building a payload URL.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Payload data must not be empty")]
    EmptyData,

    #[error("Encryption failed: {0}")]
    Encryption(#[from] SymmetricError),
}

/// Deep-link endpoint configuration.
///
/// The builder composes links against this base, and the parser only treats
/// a URL as a payload link when it matches the same endpoint.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Origin + path the deep links point at, e.g. `https://masterqr.app/`.
    pub base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl LinkConfig {
    /// Configuration for a custom deployment base.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

/// Builds a payload deep link with the default endpoint and the system clock.
///
/// An empty `password` means "do not encrypt"; `None` (or zero)
/// `expires_in_ms` means "do not expire".
pub fn build_payload_url(
    data: &str,
    password: &str,
    expires_in_ms: Option<u64>,
) -> Result<String, PayloadError> {
    build_payload_url_at(data, password, expires_in_ms, &LinkConfig::default(), now_ms())
}

/// Builds a payload deep link against a custom endpoint.
pub fn build_payload_url_with_config(
    data: &str,
    password: &str,
    expires_in_ms: Option<u64>,
    config: &LinkConfig,
) -> Result<String, PayloadError> {
    build_payload_url_at(data, password, expires_in_ms, config, now_ms())
}

/// Builds a payload deep link with an explicit clock.
///
/// `now_ms` is the current time in epoch milliseconds; the expiry deadline
/// embedded in the link is `now_ms + expires_in_ms`.
pub fn build_payload_url_at(
    data: &str,
    password: &str,
    expires_in_ms: Option<u64>,
    config: &LinkConfig,
    now_ms: u64,
) -> Result<String, PayloadError> {
    if data.is_empty() {
        return Err(PayloadError::EmptyData);
    }

    // Seal when a password was supplied
    let final_data = if password.is_empty() {
        data.to_string()
    } else {
        envelope::seal(data, password)?
    };

    let base = clean_base_url(&config.base_url);

    let mut url = format!("{}?d={}", base, urlencoding::encode(&final_data));
    if let Some(ms) = expires_in_ms {
        if ms > 0 {
            url.push_str(&format!("&exp={}", now_ms + ms));
        }
    }

    Ok(url)
}

/// Collapses accidental duplicate slashes produced by origin + path
/// concatenation (`a//b` → `a/b`), leaving the scheme's `://` intact.
pub(crate) fn clean_base_url(base: &str) -> String {
    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        if c == '/' {
            let mut rev = out.chars().rev();
            if rev.next() == Some('/') && rev.next() != Some(':') {
                continue;
            }
        }
        out.push(c);
    }
    out
}
