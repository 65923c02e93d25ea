#![no_main]

use gstkit::core::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    // Each line takes 8 bytes: quantity, price, discount, rate (u16 each, 2 decimals)
    let items: Vec<LineItemInput> = data
        .chunks_exact(8)
        .take(200)
        .map(|c| {
            let field = |i: usize| Decimal::new(i64::from(u16::from_le_bytes([c[i], c[i + 1]])), 2);
            LineItemInput::new(field(0), field(2))
                .with_discount(field(4))
                .with_gst_rate(field(6))
        })
        .collect();
    let supply = SupplyType::from(data.first().is_some_and(|b| b & 1 == 1));

    match calculate_invoice_totals(&items, supply, Decimal::ZERO) {
        Ok(totals) => {
            assert!(totals.round_off.abs() <= Decimal::new(5, 1));
            assert_eq!(totals.total_gst, totals.cgst + totals.sgst + totals.igst);
        }
        // Only discounts above 100% are rejected
        Err(_) => assert!(items.iter().any(|i| i.discount_percent > Decimal::ONE_HUNDRED)),
    }
});
