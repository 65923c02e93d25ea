//! Input validation for lines and documents.
//!
//! The calculators fail on the first bad input. These functions instead
//! collect every problem so a form can show them all at once.

use rust_decimal::Decimal;

use crate::gstin::{Gstin, is_known_state_code};

use super::error::ValidationError;
use super::types::*;

/// Validate one line. `index` is zero-based and only used in field paths.
pub fn validate_line_item(item: &LineItemInput, index: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let prefix = format!("lines[{index}]");

    if item.quantity < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            format!("quantity must not be negative, got {}", item.quantity),
        ));
    }
    if item.unit_price < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            format!("unit price must not be negative, got {}", item.unit_price),
        ));
    }
    if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&item.discount_percent) {
        errors.push(ValidationError::new(
            format!("{prefix}.discount_percent"),
            format!(
                "discount must be within 0-100%, got {}",
                item.discount_percent
            ),
        ));
    }
    if item.gst_rate < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.gst_rate"),
            format!("GST rate must not be negative, got {}", item.gst_rate),
        ));
    } else if GstSlab::from_percent(item.gst_rate).is_none() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.gst_rate"),
            format!(
                "{}% is not a GST slab (0, 5, 12, 18 or 28%)",
                item.gst_rate
            ),
            "GST-SLAB",
        ));
    }

    errors
}

/// Validate a document: parties, dates, lines, discount and payments.
///
/// Checks that depend on totals (the additional discount and the amount
/// paid) only run when every line could be calculated.
pub fn validate_document(document: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if document.number.trim().is_empty() {
        errors.push(ValidationError::new(
            "number",
            "document number must not be empty",
        ));
    }

    validate_party(&document.seller, "seller", &mut errors);
    validate_party(&document.buyer, "buyer", &mut errors);

    if document.kind == DocumentKind::TaxInvoice && document.seller.gstin.is_none() {
        errors.push(ValidationError::with_rule(
            "seller.gstin",
            "a tax invoice must carry the seller's GSTIN",
            "GST-SELLER",
        ));
    }

    if let Some(due) = document.due_date {
        if due < document.issue_date {
            errors.push(ValidationError::new(
                "due_date",
                format!("due date {due} is before issue date {}", document.issue_date),
            ));
        }
    }
    if let Some(until) = document.valid_until {
        if until < document.issue_date {
            errors.push(ValidationError::new(
                "valid_until",
                format!(
                    "validity {until} ends before issue date {}",
                    document.issue_date
                ),
            ));
        }
    }

    for (idx, line) in document.lines.iter().enumerate() {
        if line.description.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("lines[{idx}].description"),
                "description must not be empty",
            ));
        }
        errors.extend(validate_line_item(&line.item, idx));
    }

    if document.additional_discount < Decimal::ZERO {
        errors.push(ValidationError::new(
            "additional_discount",
            format!(
                "additional discount must not be negative, got {}",
                document.additional_discount
            ),
        ));
    }
    if document.amount_paid < Decimal::ZERO {
        errors.push(ValidationError::new(
            "amount_paid",
            format!(
                "amount paid must not be negative, got {}",
                document.amount_paid
            ),
        ));
    }

    let line_taxable: Option<Decimal> = document
        .lines
        .iter()
        .map(|l| l.result.map(|r| r.taxable_amount))
        .sum();
    if let Some(line_taxable) = line_taxable {
        if document.additional_discount > line_taxable {
            errors.push(ValidationError::new(
                "additional_discount",
                format!(
                    "additional discount {} exceeds the discounted subtotal {line_taxable}",
                    document.additional_discount
                ),
            ));
        } else if document.amount_paid > document.totals.grand_total {
            errors.push(ValidationError::new(
                "amount_paid",
                format!(
                    "amount paid {} exceeds the grand total {}",
                    document.amount_paid, document.totals.grand_total
                ),
            ));
        }
    }

    errors
}

fn validate_party(party: &Party, prefix: &str, errors: &mut Vec<ValidationError>) {
    if party.name.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.name"),
            "name must not be empty",
        ));
    }

    if let Some(gstin) = &party.gstin {
        if let Err(e) = Gstin::parse(gstin) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.gstin"),
                e.reason,
                "GSTIN-FORMAT",
            ));
        }
    }

    if let Some(place) = &party.place_of_supply {
        if !is_known_state_code(place.trim()) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.place_of_supply"),
                format!("unknown state code '{place}'"),
                "GST-POS",
            ));
        }
    }
}
