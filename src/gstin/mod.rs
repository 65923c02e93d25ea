//! GSTIN validation, state codes and inter-state classification.
//!
//! # Example
//!
//! ```
//! use gstkit::gstin::*;
//!
//! assert!(validate_gstin("27ABCDE1234F1Z5"));
//! assert_eq!(state_code_from_gstin("27ABCDE1234F1Z5").as_deref(), Some("27"));
//! assert_eq!(state_name("27"), Some("Maharashtra"));
//!
//! // Malformed GSTINs never make a supply inter-state
//! assert!(!is_inter_state_transaction("bad-gstin", "29AAGCB7383J1Z4"));
//!
//! // Stricter check including the check character
//! assert!(verify_gstin_checksum("29AAGCB7383J1Z4"));
//! ```

mod checksum;
mod format;
mod states;

pub use checksum::{gstin_check_char, verify_gstin_checksum};
pub use format::{
    GSTIN_LEN, Gstin, GstinError, is_inter_state_transaction, state_code_from_gstin,
    validate_gstin,
};
pub use states::{is_known_state_code, state_name};
