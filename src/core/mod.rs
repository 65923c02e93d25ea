//! GST calculators, documents, validation and numbering.
//!
//! The calculators in this module are pure functions over
//! [`rust_decimal::Decimal`]; documents and the number sequence build on
//! top of them.

mod builder;
mod calc;
mod config;
mod document;
mod error;
mod numbering;
mod supply;
mod types;
mod validation;

pub use builder::*;
pub use calc::*;
pub use config::*;
pub use document::*;
pub use error::*;
pub use numbering::*;
pub use supply::*;
pub use types::*;
pub use validation::*;
