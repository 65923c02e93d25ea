use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::config::TotalsConfig;
use super::error::GstError;
use super::supply::determine_supply_type;
use super::types::*;
use super::validation;

/// Builder for quotations, proforma invoices and tax invoices.
///
/// ```
/// use gstkit::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let quote = DocumentBuilder::new(DocumentKind::Quotation, "QTN/2024-25/0007", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
///     .valid_until(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
///     .seller(PartyBuilder::new("Suryodaya Solar Pvt Ltd").gstin("27AAPFU0939F1ZV").build())
///     .buyer(PartyBuilder::new("R. Kulkarni").place_of_supply("27").build())
///     .add_line(LineBuilder::new("3 kW rooftop system", dec!(1), dec!(165000))
///         .hsn_sac("8541")
///         .gst_rate(dec!(12))
///         .build())
///     .build()
///     .unwrap();
///
/// assert_eq!(quote.totals.cgst, dec!(9900));
/// assert_eq!(quote.totals.grand_total, dec!(184800));
/// ```
pub struct DocumentBuilder {
    kind: DocumentKind,
    number: String,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    valid_until: Option<NaiveDate>,
    seller: Option<Party>,
    buyer: Option<Party>,
    lines: Vec<DocumentLine>,
    additional_discount: Decimal,
    amount_paid: Decimal,
    notes: Vec<String>,
    supply_type: Option<SupplyType>,
    config: TotalsConfig,
}

impl DocumentBuilder {
    pub fn new(kind: DocumentKind, number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            kind,
            number: number.into(),
            issue_date,
            due_date: None,
            valid_until: None,
            seller: None,
            buyer: None,
            lines: Vec::new(),
            additional_discount: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            notes: Vec::new(),
            supply_type: None,
            config: TotalsConfig::default(),
        }
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn valid_until(mut self, date: NaiveDate) -> Self {
        self.valid_until = Some(date);
        self
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.buyer = Some(party);
        self
    }

    pub fn add_line(mut self, line: DocumentLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn additional_discount(mut self, amount: Decimal) -> Self {
        self.additional_discount = amount;
        self
    }

    pub fn amount_paid(mut self, amount: Decimal) -> Self {
        self.amount_paid = amount;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Override the supply type instead of deriving it from the parties.
    pub fn supply_type(mut self, supply: SupplyType) -> Self {
        self.supply_type = Some(supply);
        self
    }

    pub fn config(mut self, config: TotalsConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the document, calculating totals and running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Document, GstError> {
        let mut document = self.assemble()?;

        // Only a quotation may be a draft without lines
        if document.lines.is_empty() && document.kind != DocumentKind::Quotation {
            return Err(GstError::Builder(format!(
                "a {} needs at least one line item",
                document.kind.title().to_lowercase()
            )));
        }

        let calculated = document.recalculate();

        let errors = validation::validate_document(&document);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GstError::Validation(msg));
        }
        calculated?;

        tracing::debug!(
            number = %document.number,
            kind = ?document.kind,
            supply = ?document.supply_type,
            grand_total = %document.totals.grand_total,
            "document built"
        );
        Ok(document)
    }

    /// Build without validation, for importing stored records.
    /// Calculation errors are still returned.
    pub fn build_unchecked(self) -> Result<Document, GstError> {
        let mut document = self.assemble()?;
        document.recalculate()?;
        Ok(document)
    }

    fn assemble(self) -> Result<Document, GstError> {
        let seller = self
            .seller
            .ok_or_else(|| GstError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| GstError::Builder("buyer is required".into()))?;

        if self.lines.len() > 10_000 {
            return Err(GstError::Builder(
                "document cannot have more than 10,000 line items".into(),
            ));
        }
        if self.number.len() > 200 {
            return Err(GstError::Builder(
                "document number cannot exceed 200 characters".into(),
            ));
        }

        let supply_type = self
            .supply_type
            .unwrap_or_else(|| determine_supply_type(&seller, &buyer));

        Ok(Document {
            kind: self.kind,
            number: self.number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            valid_until: self.valid_until,
            seller,
            buyer,
            lines: self.lines,
            additional_discount: self.additional_discount,
            amount_paid: self.amount_paid,
            notes: self.notes,
            supply_type,
            config: self.config,
            totals: InvoiceTotals::default(),
        })
    }
}

/// Builder for Party (seller/buyer).
pub struct PartyBuilder {
    name: String,
    gstin: Option<String>,
    place_of_supply: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gstin: None,
            place_of_supply: None,
            address: None,
            phone: None,
            email: None,
        }
    }

    pub fn gstin(mut self, gstin: impl Into<String>) -> Self {
        self.gstin = Some(gstin.into());
        self
    }

    pub fn place_of_supply(mut self, state_code: impl Into<String>) -> Self {
        self.place_of_supply = Some(state_code.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            gstin: self.gstin,
            place_of_supply: self.place_of_supply,
            address: self.address,
            phone: self.phone,
            email: self.email,
        }
    }
}

/// Builder for DocumentLine.
pub struct LineBuilder {
    description: String,
    hsn_sac: Option<String>,
    unit: Option<String>,
    item: LineItemInput,
}

impl LineBuilder {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            hsn_sac: None,
            unit: None,
            item: LineItemInput::new(quantity, unit_price),
        }
    }

    pub fn discount_percent(mut self, percent: Decimal) -> Self {
        self.item.discount_percent = percent;
        self
    }

    pub fn gst_rate(mut self, rate: Decimal) -> Self {
        self.item.gst_rate = rate;
        self
    }

    pub fn slab(mut self, slab: GstSlab) -> Self {
        self.item.gst_rate = slab.percent();
        self
    }

    pub fn hsn_sac(mut self, code: impl Into<String>) -> Self {
        self.hsn_sac = Some(code.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn build(self) -> DocumentLine {
        DocumentLine {
            description: self.description,
            hsn_sac: self.hsn_sac,
            unit: self.unit,
            item: self.item,
            result: None,
        }
    }
}
