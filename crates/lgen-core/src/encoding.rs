//! Lowercase hex encoding shared by feature payloads, digests, and keys.

use crate::error::CoreError;

/// Render bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a hex string (either case) into bytes. Only ASCII hex digits are
/// accepted; signs and whitespace are errors.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, CoreError> {
    if let Some(pos) = hex.bytes().position(|b| !b.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "invalid hex at position {pos}"
        )));
    }
    if hex.len() % 2 != 0 {
        return Err(CoreError::Validation(
            "hex string must have even length".to_string(),
        ));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| CoreError::Validation(format!("invalid hex at position {i}")))
        })
        .collect()
}

/// First four bytes as hex, for `Debug` output that must not leak full values.
pub fn hex_prefix(bytes: &[u8]) -> String {
    to_hex(&bytes[..bytes.len().min(4)])
}
