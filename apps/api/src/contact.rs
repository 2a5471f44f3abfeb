//! Contact address obfuscation.
//!
//! Each side of the `@` is base64-encoded and the encoded text reversed, so
//! the data file and API payloads never carry the plain address.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("obfuscated address has no '@' separator")]
    MissingSeparator,

    #[error("obfuscated address is not valid base64")]
    Encoding,

    #[error("decoded address is not UTF-8")]
    NotUtf8,
}

/// Inverse of [`deobfuscate_email`]. Data files are prepared offline, so
/// only tests need it.
#[cfg(test)]
pub fn obfuscate_email(email: &str) -> String {
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    format!("{}@{}", encode_part(local), encode_part(domain))
}

pub fn deobfuscate_email(obfuscated: &str) -> Result<String, ContactError> {
    let (local, domain) = obfuscated
        .split_once('@')
        .ok_or(ContactError::MissingSeparator)?;
    Ok(format!("{}@{}", decode_part(local)?, decode_part(domain)?))
}

#[cfg(test)]
fn encode_part(part: &str) -> String {
    STANDARD.encode(part).chars().rev().collect()
}

fn decode_part(part: &str) -> Result<String, ContactError> {
    let reversed: String = part.chars().rev().collect();
    let bytes = STANDARD
        .decode(reversed.as_bytes())
        .map_err(|_| ContactError::Encoding)?;
    String::from_utf8(bytes).map_err(|_| ContactError::NotUtf8)
}
