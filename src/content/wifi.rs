//! Wi-Fi payload tokenizer and composer.
//!
//! Wire format is the standard QR Wi-Fi convention:
//! `WIFI:T:<WPA|WEP|nopass>;S:<ssid>;[P:<password>;];;`
//!
//! Fields are `KEY:value` tokens separated by `;`. Values are not escaped:
//! an SSID or password containing `;` or `:` will not survive the trip. That
//! limitation is carried forward from the deployed format - escaping here
//! would break wire compatibility with existing codes.

/// A Wi-Fi network configuration carried in a `WIFI:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiNetwork {
    /// Network name. Empty when the payload carried no `S:` field.
    pub ssid: String,
    /// Network password. Empty for open networks.
    pub password: String,
    /// Authentication type token: `WPA`, `WEP`, or `nopass`.
    pub auth: String,
}

impl WifiNetwork {
    /// An open network (no password).
    pub fn open(ssid: &str) -> Self {
        Self {
            ssid: ssid.to_string(),
            password: String::new(),
            auth: "nopass".to_string(),
        }
    }

    /// A protected network.
    pub fn protected(ssid: &str, password: &str, auth: &str) -> Self {
        Self {
            ssid: ssid.to_string(),
            password: password.to_string(),
            auth: auth.to_string(),
        }
    }

    /// Composes the wire-format payload string.
    ///
    /// The `P:` field is omitted entirely for an empty password.
    pub fn to_payload(&self) -> String {
        if self.password.is_empty() {
            format!("WIFI:T:{};S:{};;", self.auth, self.ssid)
        } else {
            format!("WIFI:T:{};S:{};P:{};;", self.auth, self.ssid, self.password)
        }
    }
}

/// Extracts Wi-Fi fields from a `WIFI:` payload string.
///
/// Returns `None` when the `WIFI:` prefix is absent. The first occurrence of
/// each of `T`/`S`/`P` wins; unknown keys are ignored. A missing `T:` reads
/// as `nopass`, a missing `P:` as an empty password.
pub fn parse_wifi(text: &str) -> Option<WifiNetwork> {
    let body = text.strip_prefix("WIFI:")?;

    let mut ssid = None;
    let mut password = None;
    let mut auth = None;

    for field in body.split(';') {
        if let Some((key, value)) = field.split_once(':') {
            match key {
                "S" if ssid.is_none() => ssid = Some(value.to_string()),
                "P" if password.is_none() => password = Some(value.to_string()),
                "T" if auth.is_none() => auth = Some(value.to_string()),
                _ => {}
            }
        }
    }

    Some(WifiNetwork {
        ssid: ssid.unwrap_or_default(),
        password: password.unwrap_or_default(),
        auth: auth.unwrap_or_else(|| "nopass".to_string()),
    })
}
