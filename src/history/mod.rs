//! Scan and generation history for MasterQR.
//!
//! History is a list of [`HistoryItem`] records persisted as JSON in
//! `~/.masterqr/history.json`. Items always store the *wrapped* payload text,
//! never decrypted plaintext, so re-opening a protected item re-prompts for
//! the password. The stored `expires_at` is informational; staleness is
//! re-evaluated against the clock whenever an item is viewed.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{classify, ScanType};
use crate::payload::parse_payload;

/// Errors that can occur when managing history.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Where a history item came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Scan,
    Generate,
}

/// Presentation metadata recorded with a generated code.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct QrMeta {
    /// Foreground color the code was rendered with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One recorded scan or generation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HistoryItem {
    pub id: String,

    /// The raw scanned/generated string, always in wrapped form.
    pub text: String,

    /// Semantic kind of the payload at record time.
    #[serde(rename = "type")]
    pub scan_type: ScanType,

    /// Record time in epoch milliseconds.
    pub timestamp: u64,

    /// Expiry deadline extracted from the payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,

    #[serde(default)]
    pub meta: QrMeta,

    pub source: Source,
}

/// The history list, newest first.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct HistoryStore {
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

impl HistoryStore {
    /// Loads history from the default location.
    ///
    /// Returns an empty store if the file doesn't exist yet.
    pub fn load() -> Result<Self, HistoryError> {
        Self::load_from(&Self::store_path()?)
    }

    /// Loads history from an explicit path.
    pub fn load_from(path: &PathBuf) -> Result<Self, HistoryError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let store: HistoryStore = serde_json::from_str(&content)?;
        Ok(store)
    }

    /// Saves history to the default location.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn save(&self) -> Result<(), HistoryError> {
        self.save_to(&Self::store_path()?)
    }

    /// Saves history to an explicit path.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), HistoryError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the history file (`~/.masterqr/history.json`).
    pub fn store_path() -> Result<PathBuf, HistoryError> {
        let home = dirs::home_dir().ok_or(HistoryError::NoConfigDir)?;
        Ok(home.join(".masterqr").join("history.json"))
    }

    /// Records a payload, classifying it and extracting its expiry.
    ///
    /// Classification runs on the unwrapped data, so a protected payload is
    /// recorded as `crypto` whatever it hides. Re-scanning a known text moves
    /// the existing entry to the top instead of duplicating it.
    pub fn record(&mut self, text: &str, source: Source, meta: QrMeta) -> &HistoryItem {
        let parsed = parse_payload(text);
        let scan_type = classify(&parsed.data);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        if source == Source::Scan {
            if let Some(existing) = self.items.iter().position(|item| item.text == text) {
                self.items.remove(existing);
            }
        }

        let item = HistoryItem {
            id: timestamp.to_string(),
            text: text.to_string(),
            scan_type,
            timestamp,
            expires_at: parsed.expires_at,
            meta,
            source,
        };

        self.items.insert(0, item);
        &self.items[0]
    }

    /// Removes all history entries.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
