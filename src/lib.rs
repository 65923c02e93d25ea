//! # gstkit
//!
//! GST arithmetic for Indian quotations, invoices and payments:
//! CGST/SGST/IGST breakdowns, line item and document totals with
//! round-off, reverse GST extraction, and GSTIN classification.
//!
//! All monetary values use [`rust_decimal::Decimal`] in rupees, never
//! floating point. Every calculator is a pure function; the caller owns
//! persistence, rendering and user interaction.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gstkit::core::*;
//! use rust_decimal_macros::dec;
//!
//! let line = calculate_line_item_total(dec!(10), dec!(500), dec!(5), dec!(18), SupplyType::IntraState)
//!     .unwrap();
//! assert_eq!(line.gst.cgst, dec!(427.5));
//! assert_eq!(line.line_total, dec!(5605));
//!
//! let doc = DocumentBuilder::new(DocumentKind::TaxInvoice, "INV/2024-25/0001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .seller(PartyBuilder::new("Suryodaya Solar Pvt Ltd").gstin("27AAPFU0939F1ZV").build())
//!     .buyer(PartyBuilder::new("Greenfield Textiles").gstin("29AAGCB7383J1Z4").build())
//!     .add_line(LineBuilder::new("Mono PERC module 540 Wp", dec!(10), dec!(14500)).gst_rate(dec!(12)).build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(doc.supply_type, SupplyType::InterState);
//! assert_eq!(doc.totals.igst, dec!(17400));
//! assert_eq!(doc.totals.grand_total, dec!(162400));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Calculators, slabs, validation, documents, numbering |
//! | `gstin` | GSTIN format, check character, state codes |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "gstin")]
pub mod gstin;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
