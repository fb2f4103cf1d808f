//! Cryptographic operations for MasterQR.
//!
//! This module provides the single primitive the payload format needs:
//! password-based symmetric encryption of a text string to and from a
//! transport-safe (Base64) string. There are no recipient keys and no key
//! management; protection is password-only by design.

pub mod symmetric;

pub use symmetric::{decrypt_text, encrypt_text, SymmetricError};
