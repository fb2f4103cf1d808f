//! Deep-link payload parser.
//!
//! Takes an arbitrary string - freeform user text, a regular URL, or a deep
//! link produced by the builder - and normalizes it to a [`PayloadData`]:
//! detects whether it is one of our payload URLs, extracts the `d` and `exp`
//! query parameters, and evaluates the encryption and expiry state. Detection
//! happens before classification; content inspection never runs on the raw
//! deep-link string.

use url::Url;

use super::builder::{clean_base_url, LinkConfig};
use super::{envelope, now_ms};

/// Result of parsing any candidate string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadData {
    /// The original untouched input.
    pub raw: String,
    /// The unwrapped content: the decoded `d` value for a deep link, or the
    /// original string otherwise. May itself still be an envelope string.
    pub data: String,
    /// True iff `data` starts with the envelope marker. Evaluated against
    /// `data`, never against `raw`, so a bare envelope and a deep-link-wrapped
    /// envelope both classify correctly.
    pub is_encrypted: bool,
    /// Absolute expiry deadline in epoch milliseconds, present iff the source
    /// was a deep link whose `exp` parameter parsed as an integer.
    pub expires_at: Option<u64>,
    /// True iff `expires_at` is set and strictly less than the clock at parse
    /// time. Recomputed on every parse; never cached across time.
    pub is_expired: bool,
}

/// Payload content as a tagged union, so downstream code never re-inspects
/// marker prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Readable content.
    Plain(String),
    /// Sealed content; carries the ciphertext with the marker stripped.
    Encrypted(String),
}

impl PayloadData {
    /// The content as a [`Payload`] tagged union.
    pub fn payload(&self) -> Payload {
        match envelope::strip(&self.data) {
            Some(ciphertext) => Payload::Encrypted(ciphertext.to_string()),
            None => Payload::Plain(self.data.clone()),
        }
    }

    /// Unlocks the content with a password.
    ///
    /// Plain content passes through unchanged; sealed content decrypts to
    /// `Some(plaintext)` or fails closed with `None`.
    pub fn unlock(&self, password: &str) -> Option<String> {
        envelope::open(&self.data, password)
    }

    /// Re-evaluates expiry against a fresh clock reading.
    pub fn expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(deadline) => now_ms > deadline,
            None => false,
        }
    }
}

/// Parses a candidate string with the default endpoint and the system clock.
pub fn parse_payload(text: &str) -> PayloadData {
    parse_payload_at(text, &LinkConfig::default(), now_ms())
}

/// Parses a candidate string against a custom endpoint.
pub fn parse_payload_with_config(text: &str, config: &LinkConfig) -> PayloadData {
    parse_payload_at(text, config, now_ms())
}

/// Parses a candidate string with an explicit clock.
///
/// Recognition rules, in order:
/// 1. The string parses as an absolute URL, carries a `d` query parameter,
///    and its scheme, host, port, and path match the configured base link.
///    A foreign URL that happens to carry `?d=...` is NOT a payload link;
///    it flows through as plain content.
/// 2. The string does not parse as an absolute URL but contains `?d=`:
///    everything from the first `?` is parsed as a bare query string
///    (tolerant fallback for partial or relative input).
/// 3. Anything else passes through unchanged.
///
/// A non-numeric `exp` is treated as absent rather than an error, so such a
/// payload is simply never expired via that field.
pub fn parse_payload_at(text: &str, config: &LinkConfig, now_ms: u64) -> PayloadData {
    let mut data = text.to_string();
    let mut expires_at = None;

    if let Some(params) = payload_params(text, config) {
        // First occurrence wins for both parameters
        let mut d = None;
        let mut exp = None;
        for (key, value) in params {
            match key.as_str() {
                "d" if d.is_none() => d = Some(value),
                "exp" if exp.is_none() => exp = Some(value),
                _ => {}
            }
        }

        if let Some(value) = d {
            data = value;
        }
        expires_at = exp.and_then(|v| v.parse::<u64>().ok());
    }

    let is_encrypted = envelope::is_wrapped(&data);
    // Strict greater-than: exact equality with the deadline is not expired
    let is_expired = matches!(expires_at, Some(deadline) if now_ms > deadline);

    PayloadData {
        raw: text.to_string(),
        data,
        is_encrypted,
        expires_at,
        is_expired,
    }
}

/// Extracts decoded query parameters when `text` is a payload link.
///
/// `d` is mandatory for a string to be recognized at all. Percent-escapes are
/// decoded exactly once; `+` is accepted as a space for compatibility with
/// form-encoded links.
fn payload_params(text: &str, config: &LinkConfig) -> Option<Vec<(String, String)>> {
    if text.is_empty() {
        return None;
    }

    match Url::parse(text) {
        Ok(url) => {
            if !same_endpoint(&url, config) {
                return None;
            }
            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
            if pairs.iter().any(|(k, _)| k == "d") {
                Some(pairs)
            } else {
                None
            }
        }
        Err(_) => {
            // Fallback for partial strings like "?d=..."
            if !text.contains("?d=") {
                return None;
            }
            let start = text.find('?')?;
            let query = &text[start + 1..];
            let pairs: Vec<(String, String)> =
                url::form_urlencoded::parse(query.as_bytes()).into_owned().collect();
            if pairs.iter().any(|(k, _)| k == "d") {
                Some(pairs)
            } else {
                None
            }
        }
    }
}

/// True iff the URL points at the configured deep-link endpoint.
fn same_endpoint(url: &Url, config: &LinkConfig) -> bool {
    let base = match Url::parse(&clean_base_url(&config.base_url)) {
        Ok(base) => base,
        Err(_) => return false,
    };

    url.scheme() == base.scheme()
        && url.host_str() == base.host_str()
        && url.port_or_known_default() == base.port_or_known_default()
        && url.path() == base.path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::build_payload_url_at;

    fn app() -> LinkConfig {
        LinkConfig::new("https://app/")
    }

    #[test]
    fn test_plain_text_passes_through() {
        let parsed = parse_payload_at("plain text, no query params", &app(), 0);
        assert_eq!(parsed.data, "plain text, no query params");
        assert_eq!(parsed.raw, parsed.data);
        assert!(!parsed.is_encrypted);
        assert_eq!(parsed.expires_at, None);
        assert!(!parsed.is_expired);
    }

    #[test]
    fn test_deep_link_roundtrip() {
        let url = build_payload_url_at("hello world", "", None, &app(), 0).unwrap();
        let parsed = parse_payload_at(&url, &app(), 0);
        assert_eq!(parsed.data, "hello world");
        assert_eq!(parsed.raw, url);
        assert!(!parsed.is_encrypted);
        assert_eq!(parsed.expires_at, None);
    }

    #[test]
    fn test_exp_extracted() {
        let parsed = parse_payload_at("https://app/?d=x&exp=61000", &app(), 1_000);
        assert_eq!(parsed.expires_at, Some(61_000));
        assert!(!parsed.is_expired);
    }

    #[test]
    fn test_param_order_does_not_matter() {
        let parsed = parse_payload_at("https://app/?exp=500&d=x", &app(), 0);
        assert_eq!(parsed.data, "x");
        assert_eq!(parsed.expires_at, Some(500));
    }

    #[test]
    fn test_non_numeric_exp_treated_as_absent() {
        let parsed = parse_payload_at("https://app/?d=x&exp=soon", &app(), 0);
        assert_eq!(parsed.expires_at, None);
        assert!(!parsed.is_expired);

        let negative = parse_payload_at("https://app/?d=x&exp=-5", &app(), 0);
        assert_eq!(negative.expires_at, None);
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let url = "https://app/?d=x&exp=1000";
        // Exact equality with the deadline is not expired
        assert!(!parse_payload_at(url, &app(), 1_000).is_expired);
        assert!(parse_payload_at(url, &app(), 1_001).is_expired);
    }

    #[test]
    fn test_encryption_detected_on_data_not_raw() {
        // Deep-link-wrapped envelope
        let url = build_payload_url_at("secret", "pw", None, &app(), 0).unwrap();
        assert!(parse_payload_at(&url, &app(), 0).is_encrypted);

        // Bare envelope, no deep link at all
        let sealed = crate::payload::seal("secret", "pw").unwrap();
        assert!(parse_payload_at(&sealed, &app(), 0).is_encrypted);
    }

    #[test]
    fn test_foreign_url_with_d_param_is_not_a_payload() {
        let foreign = "https://evil.example/?d=injected&exp=1";
        let parsed = parse_payload_at(foreign, &app(), 10);
        assert_eq!(parsed.data, foreign);
        assert_eq!(parsed.expires_at, None);
        assert!(!parsed.is_expired);
    }

    #[test]
    fn test_same_host_different_path_is_not_a_payload() {
        let parsed = parse_payload_at("https://app/other?d=x", &app(), 0);
        assert_eq!(parsed.data, "https://app/other?d=x");
    }

    #[test]
    fn test_bare_query_fallback() {
        let parsed = parse_payload_at("?d=hello%20world&exp=99", &app(), 0);
        assert_eq!(parsed.data, "hello world");
        assert_eq!(parsed.expires_at, Some(99));
    }

    #[test]
    fn test_url_without_d_is_plain_content() {
        let parsed = parse_payload_at("https://app/?q=search", &app(), 0);
        assert_eq!(parsed.data, "https://app/?q=search");
        assert_eq!(parsed.expires_at, None);
    }

    #[test]
    fn test_plus_decodes_as_space() {
        let parsed = parse_payload_at("https://app/?d=hello+world", &app(), 0);
        assert_eq!(parsed.data, "hello world");
    }

    #[test]
    fn test_payload_tagged_union() {
        let plain = parse_payload_at("just text", &app(), 0);
        assert_eq!(plain.payload(), Payload::Plain("just text".to_string()));

        let sealed = crate::payload::seal("secret", "pw").unwrap();
        let parsed = parse_payload_at(&sealed, &app(), 0);
        match parsed.payload() {
            Payload::Encrypted(ciphertext) => assert!(!ciphertext.is_empty()),
            other => panic!("expected encrypted payload, got {:?}", other),
        }
    }

    #[test]
    fn test_unlock() {
        let url = build_payload_url_at("top secret", "pw123", None, &app(), 0).unwrap();
        let parsed = parse_payload_at(&url, &app(), 0);
        assert_eq!(parsed.unlock("pw123").unwrap(), "top secret");
        assert_eq!(parsed.unlock("nope"), None);
    }
}
