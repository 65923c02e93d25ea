use chrono::NaiveDate;
use gstkit::core::*;
use gstkit::gstin::state_name;
use rust_decimal_macros::dec;

fn main() {
    let mut numbers = DocumentNumberSequence::for_kind(DocumentKind::TaxInvoice, 2024);
    let issue_date = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();

    // 5 kW rooftop installation for a customer in another state
    let mut invoice = DocumentBuilder::new(DocumentKind::TaxInvoice, numbers.next_number(), issue_date)
        .due_date(NaiveDate::from_ymd_opt(2024, 10, 3).unwrap())
        .seller(
            PartyBuilder::new("Suryodaya Solar Pvt Ltd")
                .gstin("27AAPFU0939F1ZV")
                .address("Plot 14, MIDC Bhosari, Pune 411026")
                .build(),
        )
        .buyer(
            PartyBuilder::new("Greenfield Textiles")
                .gstin("29AAGCB7383J1Z4")
                .address("Peenya Industrial Area, Bengaluru 560058")
                .build(),
        )
        .add_line(
            LineBuilder::new("Mono PERC module 540 Wp", dec!(10), dec!(14250.50))
                .hsn_sac("8541")
                .unit("Nos")
                .slab(GstSlab::Twelve)
                .build(),
        )
        .add_line(
            LineBuilder::new("On-grid inverter 5 kW", dec!(1), dec!(48999))
                .hsn_sac("8504")
                .unit("Nos")
                .slab(GstSlab::Twelve)
                .build(),
        )
        .add_line(
            LineBuilder::new("Installation and commissioning", dec!(1), dec!(12500))
                .hsn_sac("995461")
                .discount_percent(dec!(10))
                .slab(GstSlab::Eighteen)
                .build(),
        )
        .additional_discount(dec!(1000))
        .build()
        .expect("invoice should be valid");

    let buyer_state = invoice
        .buyer
        .gstin
        .as_deref()
        .and_then(gstkit::gstin::state_code_from_gstin)
        .and_then(|code| state_name(&code))
        .unwrap_or("unknown");

    println!("{}: {}", invoice.kind.title(), invoice.number);
    println!("Date:    {}", invoice.issue_date);
    println!("Seller:  {}", invoice.seller.name);
    println!("Buyer:   {} ({buyer_state})", invoice.buyer.name);
    println!("Supply:  {:?}", invoice.supply_type);
    println!("---");
    for line in &invoice.lines {
        let result = line.result.expect("line calculated");
        println!(
            "  {} x {} @ {} = {} (+ GST {})",
            line.item.quantity,
            line.description,
            line.item.unit_price,
            result.taxable_amount,
            result.gst.rounded().total_gst
        );
    }
    println!("---");
    for rate in invoice.tax_summary().expect("line results fit a Decimal") {
        println!(
            "  GST {}% on {}: CGST {} SGST {} IGST {}",
            rate.rate,
            round_paise(rate.taxable_amount),
            round_paise(rate.cgst),
            round_paise(rate.sgst),
            round_paise(rate.igst)
        );
    }
    let t = invoice.totals;
    println!("Taxable:   {}", round_paise(t.taxable_amount));
    println!("GST:       {}", round_paise(t.total_gst));
    println!("Round off: {}", round_paise(t.round_off));
    println!("Total:     {}", t.grand_total);

    let status = invoice
        .record_payment(dec!(100000))
        .expect("advance within balance");
    println!("Paid 100000 → {status:?}, balance {}", invoice.balance_due());
}
