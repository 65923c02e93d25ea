//! GSTIN format validation and inter-state classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::checksum::gstin_check_char;

/// Length of every GSTIN.
pub const GSTIN_LEN: usize = 15;

/// Error returned when a GSTIN fails format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GstinError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for GstinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid GSTIN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for GstinError {}

/// Check a GSTIN against the 15-character layout:
///
/// | Position | Content |
/// |----------|---------|
/// | 1-2 | state code (digits) |
/// | 3-7 | PAN letters |
/// | 8-11 | PAN digits |
/// | 12 | PAN check letter |
/// | 13 | entity code (alphanumeric) |
/// | 14 | literal `Z` |
/// | 15 | check character (alphanumeric) |
///
/// Input is trimmed and uppercased first, so lowercase GSTINs are accepted.
/// The check character is not verified here; see [`verify_gstin_checksum`](super::verify_gstin_checksum).
pub fn validate_gstin(gstin: &str) -> bool {
    layout_error(&normalize(gstin)).is_none()
}

/// Return the two-digit state code of a GSTIN, or `None` if the GSTIN
/// does not match the layout.
pub fn state_code_from_gstin(gstin: &str) -> Option<String> {
    let normalized = normalize(gstin);
    if layout_error(&normalized).is_some() {
        return None;
    }
    Some(normalized[..2].to_string())
}

/// Decide whether a supply between two registrants crosses a state border.
///
/// Returns `false` (intra-state, CGST + SGST) when either GSTIN is
/// malformed. Intra-state is the common case and the safer default for a
/// tax invoice; callers that must reject bad GSTINs validate them first.
pub fn is_inter_state_transaction(seller_gstin: &str, buyer_gstin: &str) -> bool {
    match (
        state_code_from_gstin(seller_gstin),
        state_code_from_gstin(buyer_gstin),
    ) {
        (Some(seller), Some(buyer)) => seller != buyer,
        (seller, buyer) => {
            tracing::warn!(
                seller_valid = seller.is_some(),
                buyer_valid = buyer.is_some(),
                "malformed GSTIN, classifying supply as intra-state"
            );
            false
        }
    }
}

fn normalize(gstin: &str) -> String {
    gstin.trim().to_ascii_uppercase()
}

/// Describe the first layout violation, or `None` when the layout matches.
fn layout_error(gstin: &str) -> Option<String> {
    let bytes = gstin.as_bytes();
    if bytes.len() != GSTIN_LEN {
        return Some(format!(
            "expected {GSTIN_LEN} characters, got {}",
            gstin.chars().count()
        ));
    }

    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    let letters = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_uppercase);
    let alnum = |b: u8| b.is_ascii_digit() || b.is_ascii_uppercase();

    if !digits(0..2) {
        return Some("state code must be two digits".into());
    }
    if !letters(2..7) {
        return Some("characters 3-7 must be letters".into());
    }
    if !digits(7..11) {
        return Some("characters 8-11 must be digits".into());
    }
    if !letters(11..12) {
        return Some("character 12 must be a letter".into());
    }
    if !alnum(bytes[12]) {
        return Some("entity code must be alphanumeric".into());
    }
    if bytes[13] != b'Z' {
        return Some("character 14 must be 'Z'".into());
    }
    if !alnum(bytes[14]) {
        return Some("check character must be alphanumeric".into());
    }
    None
}

/// A GSTIN that passed layout validation, stored uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gstin(String);

impl Gstin {
    /// Validate and normalize a GSTIN.
    pub fn parse(value: &str) -> Result<Self, GstinError> {
        let normalized = normalize(value);
        match layout_error(&normalized) {
            None => Ok(Self(normalized)),
            Some(reason) => Err(GstinError {
                value: value.to_string(),
                reason,
            }),
        }
    }

    /// Two-digit state code (positions 1-2).
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }

    /// PAN of the registrant (positions 3-12).
    pub fn pan(&self) -> &str {
        &self.0[2..12]
    }

    /// Entity code (position 13): registration count under the same PAN.
    pub fn entity_code(&self) -> char {
        char::from(self.0.as_bytes()[12])
    }

    /// Check character (position 15).
    pub fn check_char(&self) -> char {
        char::from(self.0.as_bytes()[14])
    }

    /// Whether the check character matches the mod-36 checksum.
    pub fn has_valid_checksum(&self) -> bool {
        gstin_check_char(&self.0) == Some(self.check_char())
    }

    /// Whether `other` is registered in a different state.
    pub fn is_inter_state_with(&self, other: &Gstin) -> bool {
        self.state_code() != other.state_code()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Gstin {
    type Err = GstinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Gstin {
    type Error = GstinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Gstin> for String {
    fn from(gstin: Gstin) -> Self {
        gstin.0
    }
}

impl AsRef<str> for Gstin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_layout() {
        assert!(validate_gstin("27ABCDE1234F1Z5"));
        assert!(validate_gstin("29AAGCB7383J1Z4"));
    }

    #[test]
    fn lowercase_accepted() {
        assert!(validate_gstin("27abcde1234f1z5"));
        assert_eq!(
            state_code_from_gstin("27abcde1234f1z5").as_deref(),
            Some("27")
        );
    }

    #[test]
    fn whitespace_trimmed() {
        assert!(validate_gstin("  27ABCDE1234F1Z5 "));
    }

    #[test]
    fn wrong_length() {
        assert!(!validate_gstin("invalid"));
        assert!(!validate_gstin(""));
        assert!(!validate_gstin("27ABCDE1234F1Z"));
        assert!(!validate_gstin("27ABCDE1234F1Z55"));
    }

    #[test]
    fn missing_z() {
        assert!(!validate_gstin("27ABCDE1234F1Y5"));
    }

    #[test]
    fn letters_in_state_code() {
        assert!(!validate_gstin("2XABCDE1234F1Z5"));
    }

    #[test]
    fn digits_in_pan_letters() {
        assert!(!validate_gstin("27AB1DE1234F1Z5"));
    }

    #[test]
    fn multibyte_input_rejected() {
        // 15 bytes, 14 characters
        assert!(!validate_gstin("27ABCDE1234F1é"));
    }

    #[test]
    fn state_code_of_invalid_is_none() {
        assert_eq!(state_code_from_gstin("bad-gstin"), None);
    }

    #[test]
    fn inter_state_classification() {
        assert!(is_inter_state_transaction(
            "27ABCDE1234F1Z5",
            "29AAGCB7383J1Z4"
        ));
        assert!(!is_inter_state_transaction(
            "27ABCDE1234F1Z5",
            "27AAPFU0939F1ZV"
        ));
    }

    #[test]
    fn malformed_falls_back_to_intra_state() {
        assert!(!is_inter_state_transaction("bad-gstin", "27ABCDE1234F1Z5"));
        assert!(!is_inter_state_transaction("27ABCDE1234F1Z5", ""));
    }

    #[test]
    fn parse_accessors() {
        let g = Gstin::parse("27aapfu0939f1zv").unwrap();
        assert_eq!(g.as_str(), "27AAPFU0939F1ZV");
        assert_eq!(g.state_code(), "27");
        assert_eq!(g.pan(), "AAPFU0939F");
        assert_eq!(g.entity_code(), '1');
        assert_eq!(g.check_char(), 'V');
    }

    #[test]
    fn parse_error_keeps_input() {
        let err = Gstin::parse("27ABCDE").unwrap_err();
        assert_eq!(err.value, "27ABCDE");
        assert!(err.reason.contains("15"));
    }
}
