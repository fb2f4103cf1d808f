//! vCard payload tokenizer and composer.
//!
//! Handles the vCard 3.0 subset the generator produces: `N`, `FN`, `TEL`,
//! `EMAIL`, `ORG` lines, newline-separated between `BEGIN:VCARD` and
//! `END:VCARD`. Parsing is line-oriented and tolerant: property names match
//! case-insensitively, `;TYPE=...` parameter suffixes are accepted, and both
//! `\n` and `\r\n` line endings work.

/// Contact fields extracted from a vCard payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCard {
    /// Display name: the `FN` value, or synthesized from the structured
    /// `N:family;given` field when `FN` is missing.
    pub full_name: String,
    pub tel: String,
    pub email: String,
    pub org: String,
}

impl ContactCard {
    /// A card with just a name.
    pub fn new(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            ..Default::default()
        }
    }

    /// Composes the wire-format vCard string.
    ///
    /// The structured `N:` line is synthesized from the whitespace-split
    /// display name, taking the last token as the family name. `\n` line
    /// endings keep the payload compact for QR capacity.
    pub fn to_payload(&self) -> String {
        let name = self.full_name.trim();
        let mut parts: Vec<&str> = name.split_whitespace().collect();

        let n_line = if parts.len() <= 1 {
            // Only a given name
            format!(";{};;;", name)
        } else {
            let family = parts.pop().unwrap_or("");
            format!("{};{};;;", family, parts.join(" "))
        };

        format!(
            "BEGIN:VCARD\nVERSION:3.0\nN:{}\nFN:{}\nTEL:{}\nEMAIL:{}\nORG:{}\nEND:VCARD",
            n_line,
            name,
            self.tel.trim(),
            self.email.trim(),
            self.org.trim()
        )
    }
}

/// Extracts contact fields from a vCard payload string.
///
/// Returns `None` when the anchored `BEGIN:VCARD` prefix (case-insensitive)
/// is absent. The first occurrence of each property wins.
pub fn parse_vcard(text: &str) -> Option<ContactCard> {
    if !super::starts_with_ignore_case(text, "BEGIN:VCARD") {
        return None;
    }

    let mut fn_value = String::new();
    let mut n_value = String::new();
    let mut tel = String::new();
    let mut email = String::new();
    let mut org = String::new();

    for line in text.lines() {
        if let Some((name, value)) = line.split_once(':') {
            // Drop ";TYPE=..." parameter suffixes from the property name
            let prop = name.split(';').next().unwrap_or("").trim().to_ascii_uppercase();
            let value = value.trim();
            match prop.as_str() {
                "FN" if fn_value.is_empty() => fn_value = value.to_string(),
                "N" if n_value.is_empty() => n_value = value.to_string(),
                "TEL" if tel.is_empty() => tel = value.to_string(),
                "EMAIL" if email.is_empty() => email = value.to_string(),
                "ORG" if org.is_empty() => org = value.to_string(),
                _ => {}
            }
        }
    }

    let full_name = if fn_value.is_empty() {
        display_name_from_n(&n_value)
    } else {
        fn_value
    };

    Some(ContactCard {
        full_name,
        tel,
        email,
        org,
    })
}

/// Synthesizes a display name from a structured `N:family;given;...` value.
fn display_name_from_n(n_value: &str) -> String {
    let parts: Vec<&str> = n_value.split(';').collect();
    match parts.len() {
        0 => String::new(),
        1 => parts[0].trim().to_string(),
        _ => format!("{} {}", parts[1], parts[0]).trim().to_string(),
    }
}
