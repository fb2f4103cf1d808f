//! Marker-based envelope codec for encrypted payload content.
//!
//! An envelope is a plain string: the literal ASCII prefix `MASTERQR:ENC:`
//! immediately followed by the ciphertext, no separator. The codec is pure
//! string-level and knows nothing about URLs; the deep-link layer treats the
//! wrapped string as opaque data.

use crate::crypto::{decrypt_text, encrypt_text, SymmetricError};
use crate::ENVELOPE_PREFIX;

/// Wraps a ciphertext in the envelope marker.
pub fn wrap(ciphertext: &str) -> String {
    format!("{}{}", ENVELOPE_PREFIX, ciphertext)
}

/// Returns true iff `s` starts with the exact envelope marker.
///
/// Case-sensitive and byte-exact; `masterqr:enc:` is not an envelope.
pub fn is_wrapped(s: &str) -> bool {
    s.starts_with(ENVELOPE_PREFIX)
}

/// Strips the envelope marker, returning the ciphertext.
///
/// Returns `None` when the marker is absent. Callers that want pass-through
/// semantics use `strip(s).unwrap_or(s)`; the parser does this deliberately
/// so non-enveloped content flows through unchanged.
pub fn strip(s: &str) -> Option<&str> {
    s.strip_prefix(ENVELOPE_PREFIX)
}

/// Encrypts `data` with `password` and wraps the result in the envelope.
pub fn seal(data: &str, password: &str) -> Result<String, SymmetricError> {
    Ok(wrap(&encrypt_text(data, password)?))
}

/// Opens an envelope with a password.
///
/// A string without the marker is returned unchanged (it was never sealed).
/// A wrapped string decrypts to `Some(plaintext)` on success and `None` on
/// wrong password or corrupted ciphertext.
pub fn open(text: &str, password: &str) -> Option<String> {
    match strip(text) {
        Some(ciphertext) => decrypt_text(ciphertext, password),
        None => Some(text.to_string()),
    }
}
