//! GSTIN check character (position 15).
//!
//! Each of the first 14 characters maps to a value in base 36
//! (`0-9` → 0-9, `A-Z` → 10-35). Values at odd positions (1-based even)
//! are doubled, each product is folded as `p / 36 + p % 36`, and the
//! check value is `(36 - sum % 36) % 36`.

const CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Compute the expected check character for a GSTIN.
///
/// Only the first 14 characters are read, so both a full GSTIN and its
/// 14-character prefix are accepted. Returns `None` for shorter input or
/// characters outside `0-9A-Z` (lowercase is uppercased first).
pub fn gstin_check_char(gstin: &str) -> Option<char> {
    let bytes = gstin.trim().as_bytes();
    if bytes.len() < 14 {
        return None;
    }

    let mut sum = 0u32;
    for (i, b) in bytes[..14].iter().enumerate() {
        let value = base36_value(b.to_ascii_uppercase())?;
        let factor = if i % 2 == 0 { 1 } else { 2 };
        let product = value * factor;
        sum += product / 36 + product % 36;
    }

    let check = (36 - sum % 36) % 36;
    Some(char::from(CHARSET[check as usize]))
}

/// Verify both the layout and the check character of a GSTIN.
pub fn verify_gstin_checksum(gstin: &str) -> bool {
    if !super::validate_gstin(gstin) {
        return false;
    }
    let normalized = gstin.trim().to_ascii_uppercase();
    let actual = normalized.chars().last();
    actual.is_some() && gstin_check_char(&normalized) == actual
}

fn base36_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'A'..=b'Z' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}
