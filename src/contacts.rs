//! Contact list ingestion from a Google Contacts CSV export.
//!
//! Exports carry dozens of columns; only the two name columns and the
//! primary email are read. Google writes UTF-16 with a byte-order mark by
//! default, so the bytes are decoded before CSV parsing; plain UTF-8 files
//! load as well.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// One person to search the registry for.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    #[serde(rename = "Given Name", default)]
    pub given_name: String,
    #[serde(rename = "Family Name", default)]
    pub family_name: String,
    #[serde(rename = "E-mail 1 - Value", default)]
    pub email: String,
}

impl Contact {
    /// Display name used as the report key.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// Load contacts from a CSV export, preserving file order.
///
/// Contacts with empty name fields are kept; the collector skips the
/// search directions they cannot support.
pub fn load_contacts(path: &Path) -> Result<Vec<Contact>> {
    let bytes = std::fs::read(path)?;
    let text = decode(&bytes)?;
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut contacts = Vec::new();
    for record in reader.deserialize() {
        contacts.push(record?);
    }
    Ok(contacts)
}

/// Decode export bytes: BOM-sniffed UTF-16 (either endianness), otherwise
/// UTF-8.
fn decode(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, "UTF-16LE", u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, "UTF-16BE", u16::from_be_bytes),
        _ => String::from_utf8(bytes.to_vec()).map_err(|_| Error::ContactsDecode("UTF-8")),
    }
}

fn decode_utf16(rest: &[u8], label: &'static str, read: fn([u8; 2]) -> u16) -> Result<String> {
    if rest.len() % 2 != 0 {
        return Err(Error::ContactsDecode(label));
    }
    let units: Vec<u16> = rest.chunks_exact(2).map(|c| read([c[0], c[1]])).collect();
    String::from_utf16(&units).map_err(|_| Error::ContactsDecode(label))
}
