use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calc::{calculate_invoice_totals_with, checked_add};
use super::error::GstError;
use super::types::*;

/// Tax summary for one GST rate, as printed below the lines of a tax invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSummary {
    pub rate: Decimal,
    /// Sum of line taxable amounts at this rate (before the additional discount).
    pub taxable_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total_gst: Decimal,
}

impl Document {
    /// Line inputs in document order.
    pub fn items(&self) -> Vec<LineItemInput> {
        self.lines.iter().map(|l| l.item.clone()).collect()
    }

    /// Recompute every line result and the document totals.
    ///
    /// On error the line results of failing lines are cleared and the
    /// totals reset to zero.
    pub fn recalculate(&mut self) -> Result<(), GstError> {
        let supply = self.supply_type;
        let mut first_error = None;

        for (idx, line) in self.lines.iter_mut().enumerate() {
            match line.item.calculate(supply) {
                Ok(result) => line.result = Some(result),
                Err(e) => {
                    line.result = None;
                    if first_error.is_none() {
                        first_error = Some(match e {
                            GstError::InvalidArgument(msg) => {
                                GstError::InvalidArgument(format!("line {}: {msg}", idx + 1))
                            }
                            other => other,
                        });
                    }
                }
            }
        }

        if let Some(e) = first_error {
            self.totals = InvoiceTotals::default();
            return Err(e);
        }

        match calculate_invoice_totals_with(
            &self.items(),
            supply,
            self.additional_discount,
            &self.config,
        ) {
            Ok(totals) => {
                self.totals = totals;
                Ok(())
            }
            Err(e) => {
                self.totals = InvoiceTotals::default();
                Err(e)
            }
        }
    }

    /// Grand total minus payments received.
    pub fn balance_due(&self) -> Decimal {
        self.totals.grand_total - self.amount_paid
    }

    pub fn payment_status(&self) -> PaymentStatus {
        if self.amount_paid <= Decimal::ZERO {
            PaymentStatus::Unpaid
        } else if self.amount_paid >= self.totals.grand_total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::PartiallyPaid
        }
    }

    /// Record a payment against the document.
    ///
    /// The amount must be positive and must not exceed the balance due.
    /// Quotations are offers and cannot be paid.
    pub fn record_payment(&mut self, amount: Decimal) -> Result<PaymentStatus, GstError> {
        if self.kind == DocumentKind::Quotation {
            return Err(GstError::InvalidArgument(format!(
                "cannot record a payment against quotation {}",
                self.number
            )));
        }
        if amount <= Decimal::ZERO {
            return Err(GstError::InvalidArgument(format!(
                "payment amount must be positive, got {amount}"
            )));
        }
        let balance = self.balance_due();
        if amount > balance {
            return Err(GstError::InvalidArgument(format!(
                "payment of {amount} exceeds balance due {balance}"
            )));
        }
        self.amount_paid += amount;
        tracing::debug!(
            number = %self.number,
            amount = %amount,
            balance_due = %self.balance_due(),
            "payment recorded"
        );
        Ok(self.payment_status())
    }

    /// GST grouped by rate, lowest rate first.
    ///
    /// Built from the line results; lines that have not been calculated
    /// are skipped.
    pub fn tax_summary(&self) -> Result<Vec<RateSummary>, GstError> {
        let mut groups: BTreeMap<Decimal, RateSummary> = BTreeMap::new();

        for line in &self.lines {
            let Some(result) = &line.result else {
                continue;
            };
            let rate = line.item.gst_rate.normalize();
            let entry = groups.entry(rate).or_insert(RateSummary {
                rate,
                taxable_amount: Decimal::ZERO,
                cgst: Decimal::ZERO,
                sgst: Decimal::ZERO,
                igst: Decimal::ZERO,
                total_gst: Decimal::ZERO,
            });
            entry.taxable_amount =
                checked_add("taxable_amount", entry.taxable_amount, result.taxable_amount)?;
            entry.cgst = checked_add("cgst", entry.cgst, result.gst.cgst)?;
            entry.sgst = checked_add("sgst", entry.sgst, result.gst.sgst)?;
            entry.igst = checked_add("igst", entry.igst, result.gst.igst)?;
            entry.total_gst = checked_add("total_gst", entry.total_gst, result.gst.total_gst)?;
        }

        Ok(groups.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DocumentBuilder, LineBuilder, PartyBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice() -> Document {
        DocumentBuilder::new(
            DocumentKind::TaxInvoice,
            "INV/2024-25/0001",
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        )
        .seller(
            PartyBuilder::new("Suryodaya Solar")
                .gstin("27AAPFU0939F1ZV")
                .build(),
        )
        .buyer(PartyBuilder::new("Buyer").gstin("27ABCDE1234F1Z5").build())
        .add_line(
            LineBuilder::new("Solar module 540 Wp", dec!(6), dec!(14500))
                .gst_rate(dec!(12))
                .build(),
        )
        .add_line(
            LineBuilder::new("Installation", dec!(1), dec!(15000))
                .gst_rate(dec!(18))
                .build(),
        )
        .add_line(
            LineBuilder::new("DC cable", dec!(30), dec!(85))
                .gst_rate(dec!(12.00))
                .build(),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn totals_and_line_results() {
        let doc = invoice();
        assert!(doc.lines.iter().all(|l| l.result.is_some()));
        // 87000 + 2550 at 12% = 10746, 15000 at 18% = 2700
        assert_eq!(doc.totals.taxable_amount, dec!(104550));
        assert_eq!(doc.totals.total_gst, dec!(13446));
        assert_eq!(doc.totals.grand_total, dec!(117996));
    }

    #[test]
    fn tax_summary_groups_by_rate() {
        let summary = invoice().tax_summary().unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].rate, dec!(12));
        assert_eq!(summary[0].taxable_amount, dec!(89550));
        assert_eq!(summary[0].cgst, dec!(5373));
        assert_eq!(summary[1].rate, dec!(18));
        assert_eq!(summary[1].total_gst, dec!(2700));
    }

    #[test]
    fn payments() {
        let mut doc = invoice();
        assert_eq!(doc.payment_status(), PaymentStatus::Unpaid);
        assert_eq!(
            doc.record_payment(dec!(50000)).unwrap(),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(doc.balance_due(), dec!(67996));
        assert!(doc.record_payment(dec!(67996.01)).is_err());
        assert!(doc.record_payment(dec!(0)).is_err());
        assert_eq!(doc.record_payment(dec!(67996)).unwrap(), PaymentStatus::Paid);
        assert_eq!(doc.balance_due(), dec!(0));
    }

    #[test]
    fn quotation_cannot_be_paid() {
        let mut doc = invoice();
        doc.kind = DocumentKind::Quotation;
        assert!(matches!(
            doc.record_payment(dec!(1000)),
            Err(GstError::InvalidArgument(_))
        ));
        assert_eq!(doc.amount_paid, dec!(0));
    }

    #[test]
    fn tax_summary_overflow_is_error() {
        let mut doc = invoice();
        for line in &mut doc.lines {
            line.result = Some(LineItemResult {
                taxable_amount: Decimal::MAX,
                ..LineItemResult::default()
            });
        }
        assert!(matches!(
            doc.tax_summary(),
            Err(GstError::InvalidArgument(_))
        ));
    }

    #[test]
    fn recalculate_after_edit() {
        let mut doc = invoice();
        doc.lines[1].item.discount_percent = dec!(10);
        doc.recalculate().unwrap();
        // installation 13500 + 18% = 2430
        assert_eq!(doc.totals.total_gst, dec!(13176));
    }

    #[test]
    fn recalculate_failure_resets_totals() {
        let mut doc = invoice();
        doc.lines[0].item.quantity = dec!(-1);
        assert!(doc.recalculate().is_err());
        assert!(doc.lines[0].result.is_none());
        assert_eq!(doc.totals.grand_total, dec!(0));
    }
}
