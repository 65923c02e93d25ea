//! Edge cases: invalid input, validation aggregation and boundary amounts.

use chrono::NaiveDate;
use gstkit::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> Party {
    PartyBuilder::new("Suryodaya Solar Pvt Ltd")
        .gstin("27AAPFU0939F1ZV")
        .build()
}

fn buyer() -> Party {
    PartyBuilder::new("Kale Agro Industries")
        .gstin("27ABCDE1234F1Z5")
        .build()
}

fn invoice() -> DocumentBuilder {
    DocumentBuilder::new(DocumentKind::TaxInvoice, "INV/2024-25/0100", date(2024, 7, 1))
        .seller(seller())
        .buyer(buyer())
}

fn validation_message(err: GstError) -> String {
    match err {
        GstError::Validation(msg) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Calculator preconditions
// ---------------------------------------------------------------------------

#[test]
fn negative_quantity_rejected() {
    let err = calculate_line_item_total(
        dec!(-1),
        dec!(100),
        dec!(0),
        dec!(18),
        SupplyType::IntraState,
    )
    .unwrap_err();
    assert!(matches!(err, GstError::InvalidArgument(_)));
    assert!(err.to_string().contains("quantity"));
}

#[test]
fn negative_unit_price_rejected() {
    assert!(
        calculate_line_item_total(dec!(1), dec!(-0.01), dec!(0), dec!(0), SupplyType::IntraState)
            .is_err()
    );
}

#[test]
fn discount_boundaries_accepted() {
    for pct in [dec!(0), dec!(100), dec!(0.01), dec!(99.99)] {
        assert!(
            calculate_line_item_total(dec!(1), dec!(100), pct, dec!(18), SupplyType::IntraState)
                .is_ok(),
            "{pct}% should be accepted"
        );
    }
}

#[test]
fn negative_additional_discount_rejected() {
    let items = [LineItemInput::new(dec!(1), dec!(100))];
    assert!(matches!(
        calculate_invoice_totals(&items, SupplyType::IntraState, dec!(-5)),
        Err(GstError::InvalidArgument(_))
    ));
}

#[test]
fn additional_discount_equal_to_subtotal() {
    let items = [LineItemInput::new(dec!(1), dec!(100)).with_gst_rate(dec!(18))];
    let totals = calculate_invoice_totals(&items, SupplyType::IntraState, dec!(100)).unwrap();
    assert_eq!(totals.taxable_amount, dec!(0));
    // Line GST is kept even when the lump-sum discount wipes the taxable amount
    assert_eq!(totals.total_gst, dec!(18));
    assert_eq!(totals.grand_total, dec!(18));
}

#[test]
fn oversized_line_is_error_not_panic() {
    let huge = Decimal::from(1_000_000_000_000_000_i64);
    let err = calculate_line_item_total(huge, huge, dec!(0), dec!(18), SupplyType::IntraState)
        .unwrap_err();
    assert!(matches!(err, GstError::InvalidArgument(_)));
    assert!(err.to_string().contains("subtotal overflows"), "{err}");
}

#[test]
fn oversized_gst_is_error_not_panic() {
    for supply in [SupplyType::IntraState, SupplyType::InterState] {
        assert!(matches!(
            calculate_gst(Decimal::MAX, dec!(18), supply),
            Err(GstError::InvalidArgument(_))
        ));
    }
}

#[test]
fn oversized_totals_are_error_not_panic() {
    let items = [
        LineItemInput::new(dec!(1), Decimal::MAX),
        LineItemInput::new(dec!(1), Decimal::MAX),
    ];
    let err = calculate_invoice_totals(&items, SupplyType::InterState, dec!(0)).unwrap_err();
    assert!(matches!(err, GstError::InvalidArgument(_)));
    assert!(err.to_string().contains("overflows"), "{err}");

    // A single maximal line fits, but its GST does not
    let taxed = [LineItemInput::new(dec!(1), Decimal::MAX).with_gst_rate(dec!(5))];
    let err = calculate_invoice_totals(&taxed, SupplyType::IntraState, dec!(0)).unwrap_err();
    assert!(err.to_string().contains("line 1: gst overflows"), "{err}");
}

#[test]
fn maximal_inclusive_amount_splits() {
    assert!(base_amount_from_gst_inclusive(Decimal::MAX, dec!(18)).is_ok());
}

#[test]
fn reverse_extraction_rejects_negative() {
    assert!(base_amount_from_gst_inclusive(dec!(-100), dec!(18)).is_err());
    assert!(base_amount_from_gst_inclusive(dec!(100), dec!(-18)).is_err());
}

#[test]
fn reverse_extraction_zero_amount() {
    let split = base_amount_from_gst_inclusive(dec!(0), dec!(28)).unwrap();
    assert_eq!(split.base_amount, dec!(0));
    assert_eq!(split.gst_amount, dec!(0));
}

#[test]
fn fractional_quantity() {
    let line = calculate_line_item_total(
        dec!(12.75),
        dec!(68),
        dec!(0),
        dec!(18),
        SupplyType::InterState,
    )
    .unwrap();
    assert_eq!(line.subtotal, dec!(867));
    assert_eq!(line.gst.igst, dec!(156.06));
}

#[test]
fn zero_quantity_line() {
    let line =
        calculate_line_item_total(dec!(0), dec!(500), dec!(0), dec!(18), SupplyType::IntraState)
            .unwrap();
    assert_eq!(line.line_total, dec!(0));
}

#[test]
fn large_invoice_totals() {
    let items: Vec<LineItemInput> = (0..1000)
        .map(|_| LineItemInput::new(dec!(3), dec!(0.07)).with_slab(GstSlab::Eighteen))
        .collect();
    let totals = calculate_invoice_totals(&items, SupplyType::IntraState, dec!(0)).unwrap();
    // 1000 * 0.21 = 210, GST 37.8
    assert_eq!(totals.subtotal, dec!(210));
    assert_eq!(totals.total_gst, dec!(37.8));
    assert_eq!(totals.grand_total, dec!(248));
    assert_eq!(totals.round_off, dec!(0.2));
}

#[test]
fn round_off_below_one_paisa() {
    // 84.75 + 18% = 100.005 → 100
    let items = [LineItemInput::new(dec!(1), dec!(84.75)).with_gst_rate(dec!(18))];
    let totals = calculate_invoice_totals(&items, SupplyType::IntraState, dec!(0)).unwrap();
    assert_eq!(totals.grand_total, dec!(100));
    assert_eq!(totals.round_off, dec!(-0.005));
}

// ---------------------------------------------------------------------------
// Document validation
// ---------------------------------------------------------------------------

#[test]
fn validation_reports_all_line_errors() {
    let err = invoice()
        .add_line(
            LineBuilder::new("", dec!(-2), dec!(100))
                .discount_percent(dec!(120))
                .gst_rate(dec!(15))
                .build(),
        )
        .build()
        .unwrap_err();
    let msg = validation_message(err);
    assert!(msg.contains("lines[0].description"), "{msg}");
    assert!(msg.contains("lines[0].quantity"), "{msg}");
    assert!(msg.contains("lines[0].discount_percent"), "{msg}");
    assert!(msg.contains("[GST-SLAB] lines[0].gst_rate"), "{msg}");
}

#[test]
fn tax_invoice_without_seller_gstin() {
    let err = DocumentBuilder::new(DocumentKind::TaxInvoice, "INV-1", date(2024, 7, 1))
        .seller(PartyBuilder::new("Unregistered Installer").build())
        .buyer(buyer())
        .add_line(LineBuilder::new("Labour", dec!(1), dec!(1000)).build())
        .build()
        .unwrap_err();
    assert!(validation_message(err).contains("[GST-SELLER] seller.gstin"));
}

#[test]
fn quotation_without_seller_gstin_allowed() {
    let quote = DocumentBuilder::new(DocumentKind::Quotation, "QTN-1", date(2024, 7, 1))
        .seller(PartyBuilder::new("Unregistered Installer").build())
        .buyer(buyer())
        .add_line(LineBuilder::new("Labour", dec!(1), dec!(1000)).build())
        .build()
        .unwrap();
    assert_eq!(quote.totals.grand_total, dec!(1000));
}

#[test]
fn malformed_buyer_gstin_is_validation_error() {
    let err = invoice()
        .buyer(PartyBuilder::new("Typo Traders").gstin("27ABCDE1234F1Y5").build())
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).slab(GstSlab::Twelve).build())
        .build()
        .unwrap_err();
    assert!(validation_message(err).contains("[GSTIN-FORMAT] buyer.gstin"));
}

#[test]
fn malformed_buyer_gstin_unchecked_is_intra_state() {
    let doc = invoice()
        .buyer(PartyBuilder::new("Typo Traders").gstin("29-bad").build())
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).slab(GstSlab::Twelve).build())
        .build_unchecked()
        .unwrap();
    assert_eq!(doc.supply_type, SupplyType::IntraState);
    assert_eq!(doc.totals.cgst, dec!(6));
}

#[test]
fn unknown_place_of_supply() {
    let err = invoice()
        .buyer(PartyBuilder::new("Walk-in").place_of_supply("42").build())
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).slab(GstSlab::Twelve).build())
        .build()
        .unwrap_err();
    assert!(validation_message(err).contains("[GST-POS] buyer.place_of_supply"));
}

#[test]
fn dates_before_issue_date() {
    let err = invoice()
        .due_date(date(2024, 6, 30))
        .valid_until(date(2024, 6, 1))
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    let msg = validation_message(err);
    assert!(msg.contains("due_date"), "{msg}");
    assert!(msg.contains("valid_until"), "{msg}");
}

#[test]
fn overpayment_rejected() {
    let err = invoice()
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).slab(GstSlab::Eighteen).build())
        .amount_paid(dec!(119))
        .build()
        .unwrap_err();
    assert!(validation_message(err).contains("amount_paid"));
}

#[test]
fn excessive_additional_discount_is_validation_error() {
    let err = invoice()
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).build())
        .additional_discount(dec!(150))
        .amount_paid(dec!(10))
        .build()
        .unwrap_err();
    let msg = validation_message(err);
    assert!(msg.contains("additional_discount"), "{msg}");
    // No spurious overpayment error while totals cannot be computed
    assert!(!msg.contains("amount_paid"), "{msg}");
}

#[test]
fn empty_document_number() {
    let err = DocumentBuilder::new(DocumentKind::TaxInvoice, "  ", date(2024, 7, 1))
        .seller(seller())
        .buyer(buyer())
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    assert!(validation_message(err).contains("number"));
}

#[test]
fn overlong_document_number() {
    let err = DocumentBuilder::new(DocumentKind::TaxInvoice, "X".repeat(201), date(2024, 7, 1))
        .seller(seller())
        .buyer(buyer())
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).build())
        .build()
        .unwrap_err();
    assert!(matches!(err, GstError::Builder(_)));
}

#[test]
fn build_unchecked_still_fails_on_bad_numbers() {
    let err = invoice()
        .add_line(LineBuilder::new("Module", dec!(1), dec!(100)).discount_percent(dec!(101)).build())
        .build_unchecked()
        .unwrap_err();
    assert!(matches!(err, GstError::InvalidArgument(_)));
}

#[test]
fn validation_error_display() {
    let plain = ValidationError::new("number", "document number must not be empty");
    assert_eq!(plain.to_string(), "number: document number must not be empty");
    let ruled = ValidationError::with_rule("lines[0].gst_rate", "not a slab", "GST-SLAB");
    assert_eq!(ruled.to_string(), "[GST-SLAB] lines[0].gst_rate: not a slab");
}

#[test]
fn malformed_gstin_error_converts() {
    let err: GstError = gstkit::gstin::Gstin::parse("nope").unwrap_err().into();
    assert!(matches!(err, GstError::MalformedGstin(_)));
    assert!(err.to_string().starts_with("invalid GSTIN 'nope'"));
}

#[test]
fn document_kind_labels() {
    assert_eq!(DocumentKind::Quotation.prefix(), "QTN");
    assert_eq!(DocumentKind::ProformaInvoice.title(), "Proforma Invoice");
    assert_eq!(DocumentKind::TaxInvoice.prefix(), "INV");
}

#[test]
fn rounded_breakdown_for_display() {
    let gst = calculate_gst(dec!(1234.567), dec!(5), SupplyType::IntraState).unwrap();
    // 61.72835 split 30.864175 each
    let r = gst.rounded();
    assert_eq!(r.taxable_amount, dec!(1234.57));
    assert_eq!(r.cgst, dec!(30.86));
    assert_eq!(r.total_gst, dec!(61.72));
    assert_eq!(r.total_amount, dec!(1296.29));
    assert_eq!(round_paise(dec!(0.125)), dec!(0.13));
    assert_eq!(round_paise(Decimal::ZERO), dec!(0));
}
