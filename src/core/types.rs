use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::config::TotalsConfig;
use super::error::GstError;

/// Whether a supply stays within one state or crosses a state border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SupplyType {
    /// Seller and buyer in the same state: tax split into CGST + SGST.
    #[default]
    IntraState,
    /// Seller and buyer in different states: tax charged as IGST.
    InterState,
}

impl SupplyType {
    /// Map the `is_inter_state` flag of the calculators onto a supply type.
    pub fn from_inter_state(is_inter_state: bool) -> Self {
        if is_inter_state {
            Self::InterState
        } else {
            Self::IntraState
        }
    }

    /// `true` for [`SupplyType::InterState`].
    pub fn is_inter_state(&self) -> bool {
        matches!(self, Self::InterState)
    }
}

impl From<bool> for SupplyType {
    fn from(is_inter_state: bool) -> Self {
        Self::from_inter_state(is_inter_state)
    }
}

/// Statutory GST rate slabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GstSlab {
    /// 0%, nil rated.
    Nil,
    /// 5%
    Five,
    /// 12%
    Twelve,
    /// 18%
    Eighteen,
    /// 28%
    TwentyEight,
}

impl GstSlab {
    /// Every slab, lowest rate first.
    pub const ALL: [GstSlab; 5] = [
        Self::Nil,
        Self::Five,
        Self::Twelve,
        Self::Eighteen,
        Self::TwentyEight,
    ];

    /// Rate in percent.
    pub fn percent(&self) -> Decimal {
        match self {
            Self::Nil => dec!(0),
            Self::Five => dec!(5),
            Self::Twelve => dec!(12),
            Self::Eighteen => dec!(18),
            Self::TwentyEight => dec!(28),
        }
    }

    /// Match a percentage against the slabs. Scale is ignored, so
    /// `18`, `18.0` and `18.00` all map to [`GstSlab::Eighteen`].
    pub fn from_percent(rate: Decimal) -> Option<Self> {
        Self::ALL.into_iter().find(|slab| slab.percent() == rate)
    }

    /// Half of the slab, charged as CGST and again as SGST on intra-state supplies.
    pub fn half_percent(&self) -> Decimal {
        self.percent() / Decimal::TWO
    }
}

impl From<GstSlab> for Decimal {
    fn from(slab: GstSlab) -> Self {
        slab.percent()
    }
}

impl TryFrom<Decimal> for GstSlab {
    type Error = GstError;

    /// Fails with [`GstError::InvalidArgument`] naming the rejected rate.
    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        Self::from_percent(rate).ok_or_else(|| {
            GstError::InvalidArgument(format!("{rate}% is not a GST slab"))
        })
    }
}

/// GST on a single taxable amount.
///
/// `total_gst == cgst + sgst + igst` always holds. Intra-state supplies
/// carry `igst == 0` and `cgst == sgst`; inter-state supplies carry only IGST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GstBreakdown {
    pub taxable_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total_gst: Decimal,
    /// `taxable_amount + total_gst`.
    pub total_amount: Decimal,
}

/// One quotation or invoice line as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Count of units; fractional quantities (e.g. metres of cable) are allowed.
    pub quantity: Decimal,
    /// Price per unit before discount and GST.
    pub unit_price: Decimal,
    /// Line discount in percent, 0-100.
    #[serde(default)]
    pub discount_percent: Decimal,
    /// GST rate in percent.
    #[serde(default)]
    pub gst_rate: Decimal,
}

impl LineItemInput {
    /// A line with no discount and no GST.
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            discount_percent: Decimal::ZERO,
            gst_rate: Decimal::ZERO,
        }
    }

    pub fn with_discount(mut self, discount_percent: Decimal) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_gst_rate(mut self, gst_rate: Decimal) -> Self {
        self.gst_rate = gst_rate;
        self
    }

    pub fn with_slab(self, slab: GstSlab) -> Self {
        self.with_gst_rate(slab.percent())
    }
}

/// Computed amounts for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineItemResult {
    /// `quantity * unit_price`.
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    /// `subtotal - discount_amount`.
    pub taxable_amount: Decimal,
    pub gst: GstBreakdown,
    /// `taxable_amount + gst.total_gst`.
    pub line_total: Decimal,
}

/// Document-level totals over all lines.
///
/// `grand_total` is a whole rupee amount and
/// `round_off == grand_total - (taxable_amount + total_gst)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    /// Line discounts plus the document-level additional discount.
    pub total_discount: Decimal,
    /// `subtotal - total_discount`.
    pub taxable_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total_gst: Decimal,
    /// Signed adjustment to reach a whole rupee, within ±0.50.
    pub round_off: Decimal,
    pub grand_total: Decimal,
}

/// Result of splitting a GST-inclusive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusiveSplit {
    pub base_amount: Decimal,
    pub gst_amount: Decimal,
}

/// Kind of commercial document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Offer sent to a lead; may be a draft without lines.
    Quotation,
    /// Advance bill for payment before supply; not a tax document.
    ProformaInvoice,
    /// Tax invoice under section 31 CGST Act.
    TaxInvoice,
}

impl DocumentKind {
    /// Default number prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Quotation => "QTN",
            Self::ProformaInvoice => "PI",
            Self::TaxInvoice => "INV",
        }
    }

    /// Heading printed on the document.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Quotation => "Quotation",
            Self::ProformaInvoice => "Proforma Invoice",
            Self::TaxInvoice => "Tax Invoice",
        }
    }
}

/// Seller or buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// GSTIN as entered; unregistered buyers have none.
    pub gstin: Option<String>,
    /// Two-digit state code of the place of supply, used for buyers without GSTIN.
    pub place_of_supply: Option<String>,
    /// Postal address, free text.
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Document line: what is sold plus the numbers to calculate with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLine {
    pub description: String,
    /// HSN code for goods or SAC code for services.
    pub hsn_sac: Option<String>,
    /// Unit label, e.g. "Nos", "Wp", "m".
    pub unit: Option<String>,
    pub item: LineItemInput,
    /// Set by [`Document::recalculate`].
    pub result: Option<LineItemResult>,
}

/// Payment state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// A quotation, proforma or tax invoice with computed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub number: String,
    pub issue_date: NaiveDate,
    /// Payment due date (invoices).
    pub due_date: Option<NaiveDate>,
    /// Offer expiry (quotations).
    pub valid_until: Option<NaiveDate>,
    pub seller: Party,
    pub buyer: Party,
    pub lines: Vec<DocumentLine>,
    /// Lump-sum discount after line discounts.
    pub additional_discount: Decimal,
    /// Sum of payments received so far.
    pub amount_paid: Decimal,
    pub notes: Vec<String>,
    pub supply_type: SupplyType,
    pub config: TotalsConfig,
    /// Set by [`Document::recalculate`].
    pub totals: InvoiceTotals,
}
