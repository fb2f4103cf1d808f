//! Symmetric encryption with a password for MasterQR payloads.
//!
//! This module provides password-based symmetric encryption using:
//! - HKDF-SHA256 for key derivation from the password
//! - ChaCha20-Poly1305 for authenticated encryption
//!
//! The output is a single Base64 string carrying `nonce || ciphertext`, so it
//! is self-contained: only the password is needed to reverse it, and it can
//! travel inside a URL query parameter or a QR code without extra transport.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use sha2::Sha256;
use thiserror::Error;

/// HKDF info string for password-based key derivation.
const HKDF_INFO: &[u8] = b"MASTERQR-V1-SYMMETRIC";

/// Salt for HKDF (fixed for deterministic behavior with the same password).
const HKDF_SALT: &[u8] = b"MASTERQR-V1-SALT-2025";

/// Nonce size for ChaCha20Poly1305.
const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size.
const TAG_SIZE: usize = 16;

/// Errors that can occur during encryption.
#[derive(Error, Debug)]
pub enum SymmetricError {
    #[error("Plaintext must not be empty")]
    EmptyPlaintext,

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed")]
    KeyDerivationFailed,
}

/// Derives a 256-bit symmetric key from a password.
fn derive_key(password: &str) -> Result<[u8; 32], SymmetricError> {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), password.as_bytes());
    let mut key = [0u8; 32];
    hk.expand(HKDF_INFO, &mut key)
        .map_err(|_| SymmetricError::KeyDerivationFailed)?;
    Ok(key)
}

/// Encrypts a text string with a password.
///
/// Output is Base64 of `nonce (12 bytes) || ciphertext (includes auth tag)`.
///
/// Empty plaintext and empty password are rejected: an envelope wrapping an
/// empty ciphertext is indistinguishable from corruption on the other side.
pub fn encrypt_text(plaintext: &str, password: &str) -> Result<String, SymmetricError> {
    if plaintext.is_empty() {
        return Err(SymmetricError::EmptyPlaintext);
    }
    if password.is_empty() {
        return Err(SymmetricError::EmptyPassword);
    }

    let key = derive_key(password)?;

    // Random nonce per message
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::RngCore::fill_bytes(&mut OsRng, &mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;

    // Prepend nonce so the ciphertext string is self-contained
    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(&result))
}

/// Decrypts a Base64 ciphertext string with a password.
///
/// Returns `None` on wrong password, malformed Base64, truncated input,
/// non-UTF-8 plaintext, or an empty decrypted result. An empty result is
/// indistinguishable from failure, so it is reported as failure. This
/// function never panics and never surfaces an error type: decryption
/// failure is a recoverable state the caller may retry with another
/// password.
pub fn decrypt_text(ciphertext: &str, password: &str) -> Option<String> {
    let data = BASE64.decode(ciphertext.trim()).ok()?;

    // Minimum: 12 (nonce) + 16 (auth tag) = 28 bytes
    if data.len() < NONCE_SIZE + TAG_SIZE {
        return None;
    }

    let key = derive_key(password).ok()?;
    let cipher = ChaCha20Poly1305::new_from_slice(&key).ok()?;
    let nonce = Nonce::from_slice(&data[..NONCE_SIZE]);

    let plaintext = cipher.decrypt(nonce, &data[NONCE_SIZE..]).ok()?;
    let text = String::from_utf8(plaintext).ok()?;

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
