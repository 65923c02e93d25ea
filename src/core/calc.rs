//! GST arithmetic: per-amount breakdown, line totals, document totals and
//! reverse extraction.
//!
//! Intermediate values are never rounded. Only the grand total (whole
//! rupees) and the reverse extraction (paise) are rounded, so summing many
//! lines does not accumulate rounding error.

use rust_decimal::{Decimal, RoundingStrategy};

use super::config::TotalsConfig;
use super::error::GstError;
use super::types::*;

/// Calculate GST on a taxable amount.
///
/// `total_gst = amount * gst_rate / 100`, charged entirely as IGST for
/// inter-state supplies and split evenly into CGST and SGST otherwise.
///
/// ```
/// use gstkit::core::*;
/// use rust_decimal_macros::dec;
///
/// let gst = calculate_gst(dec!(1000), dec!(18), SupplyType::IntraState).unwrap();
/// assert_eq!(gst.cgst, dec!(90));
/// assert_eq!(gst.sgst, dec!(90));
/// assert_eq!(gst.total_amount, dec!(1180));
/// ```
pub fn calculate_gst(
    amount: Decimal,
    gst_rate: Decimal,
    supply: SupplyType,
) -> Result<GstBreakdown, GstError> {
    ensure_non_negative("amount", amount)?;
    ensure_non_negative("gst_rate", gst_rate)?;

    let tax = checked_mul("gst", amount, gst_rate)? / Decimal::ONE_HUNDRED;
    let (cgst, sgst, igst) = match supply {
        SupplyType::InterState => (Decimal::ZERO, Decimal::ZERO, tax),
        SupplyType::IntraState => {
            let half = tax / Decimal::TWO;
            (half, half, Decimal::ZERO)
        }
    };
    let total_gst = cgst + sgst + igst;

    Ok(GstBreakdown {
        taxable_amount: amount,
        cgst,
        sgst,
        igst,
        total_gst,
        total_amount: checked_add("total_amount", amount, total_gst)?,
    })
}

/// Calculate subtotal, discount, GST and total for one line.
///
/// `discount_percent` must lie within 0-100; out-of-range values are
/// rejected rather than clamped.
pub fn calculate_line_item_total(
    quantity: Decimal,
    unit_price: Decimal,
    discount_percent: Decimal,
    gst_rate: Decimal,
    supply: SupplyType,
) -> Result<LineItemResult, GstError> {
    ensure_non_negative("quantity", quantity)?;
    ensure_non_negative("unit_price", unit_price)?;
    if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&discount_percent) {
        return Err(GstError::InvalidArgument(format!(
            "discount_percent must be within 0-100, got {discount_percent}"
        )));
    }

    let subtotal = checked_mul("subtotal", quantity, unit_price)?;
    let discount_amount =
        checked_mul("discount_amount", subtotal, discount_percent)? / Decimal::ONE_HUNDRED;
    let taxable_amount = subtotal - discount_amount;
    let gst = calculate_gst(taxable_amount, gst_rate, supply)?;

    Ok(LineItemResult {
        subtotal,
        discount_amount,
        taxable_amount,
        gst,
        line_total: gst.total_amount,
    })
}

impl LineItemInput {
    /// Calculate this line for the given supply type.
    pub fn calculate(&self, supply: SupplyType) -> Result<LineItemResult, GstError> {
        calculate_line_item_total(
            self.quantity,
            self.unit_price,
            self.discount_percent,
            self.gst_rate,
            supply,
        )
    }
}

/// Aggregate lines into document totals with the default [`TotalsConfig`].
///
/// An empty slice yields all-zero totals.
pub fn calculate_invoice_totals(
    items: &[LineItemInput],
    supply: SupplyType,
    additional_discount: Decimal,
) -> Result<InvoiceTotals, GstError> {
    calculate_invoice_totals_with(items, supply, additional_discount, &TotalsConfig::default())
}

/// Aggregate lines into document totals.
///
/// GST is summed from each line's own breakdown, so lines with different
/// rates keep their rate. `additional_discount` is a lump sum taken off
/// the taxable amount after line discounts; it does not reduce the GST
/// already computed per line.
pub fn calculate_invoice_totals_with(
    items: &[LineItemInput],
    supply: SupplyType,
    additional_discount: Decimal,
    config: &TotalsConfig,
) -> Result<InvoiceTotals, GstError> {
    ensure_non_negative("additional_discount", additional_discount)?;

    let mut subtotal = Decimal::ZERO;
    let mut total_discount = Decimal::ZERO;
    let mut cgst = Decimal::ZERO;
    let mut sgst = Decimal::ZERO;
    let mut igst = Decimal::ZERO;

    for (idx, item) in items.iter().enumerate() {
        let line = item.calculate(supply).map_err(|e| match e {
            GstError::InvalidArgument(msg) => {
                GstError::InvalidArgument(format!("line {}: {msg}", idx + 1))
            }
            other => other,
        })?;
        subtotal = checked_add("subtotal", subtotal, line.subtotal)?;
        total_discount = checked_add("total_discount", total_discount, line.discount_amount)?;
        cgst = checked_add("cgst", cgst, line.gst.cgst)?;
        sgst = checked_add("sgst", sgst, line.gst.sgst)?;
        igst = checked_add("igst", igst, line.gst.igst)?;
    }

    if additional_discount > subtotal - total_discount {
        return Err(GstError::InvalidArgument(format!(
            "additional_discount {additional_discount} exceeds discounted subtotal {}",
            subtotal - total_discount
        )));
    }
    total_discount += additional_discount;

    let taxable_amount = subtotal - total_discount;
    let total_gst = checked_add("total_gst", checked_add("total_gst", cgst, sgst)?, igst)?;
    let before_rounding = checked_add("grand_total", taxable_amount, total_gst)?;
    let grand_total = config.grand_total_rounding.round(before_rounding, 0);

    Ok(InvoiceTotals {
        subtotal,
        total_discount,
        taxable_amount,
        cgst,
        sgst,
        igst,
        total_gst,
        round_off: grand_total - before_rounding,
        grand_total,
    })
}

/// Split a GST-inclusive price into base amount and GST.
///
/// Both parts are rounded to paise (half away from zero); the GST part is
/// taken as the remainder so that `base_amount + gst_amount` reproduces
/// a two-decimal input exactly.
///
/// ```
/// use gstkit::core::*;
/// use rust_decimal_macros::dec;
///
/// let split = base_amount_from_gst_inclusive(dec!(1180), dec!(18)).unwrap();
/// assert_eq!(split.base_amount, dec!(1000));
/// assert_eq!(split.gst_amount, dec!(180));
/// ```
pub fn base_amount_from_gst_inclusive(
    inclusive_amount: Decimal,
    gst_rate: Decimal,
) -> Result<InclusiveSplit, GstError> {
    ensure_non_negative("inclusive_amount", inclusive_amount)?;
    ensure_non_negative("gst_rate", gst_rate)?;

    let divisor = Decimal::ONE + gst_rate / Decimal::ONE_HUNDRED;
    let base_amount = round_paise(inclusive_amount / divisor);
    let gst_amount = round_paise(inclusive_amount - base_amount);

    Ok(InclusiveSplit {
        base_amount,
        gst_amount,
    })
}

/// `a * b`, failing instead of panicking when the product does not fit a `Decimal`.
pub(crate) fn checked_mul(what: &str, a: Decimal, b: Decimal) -> Result<Decimal, GstError> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

pub(crate) fn checked_add(what: &str, a: Decimal, b: Decimal) -> Result<Decimal, GstError> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> GstError {
    GstError::InvalidArgument(format!("{what} overflows"))
}

impl GstBreakdown {
    /// Copy rounded to paise for display.
    ///
    /// Components are rounded individually and the totals rebuilt from
    /// them, so the breakdown invariants still hold after rounding.
    pub fn rounded(&self) -> Self {
        let taxable_amount = round_paise(self.taxable_amount);
        let cgst = round_paise(self.cgst);
        let sgst = round_paise(self.sgst);
        let igst = round_paise(self.igst);
        let total_gst = cgst + sgst + igst;
        Self {
            taxable_amount,
            cgst,
            sgst,
            igst,
            total_gst,
            total_amount: taxable_amount + total_gst,
        }
    }
}

/// Round to two decimal places, half away from zero.
pub fn round_paise(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn ensure_non_negative(name: &str, value: Decimal) -> Result<(), GstError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(GstError::InvalidArgument(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}
