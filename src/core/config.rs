use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How the grand total is rounded to a whole rupee.
///
/// The two modes only differ at exact half-rupee boundaries:
/// 100.50 becomes 101 with [`HalfAwayFromZero`](Self::HalfAwayFromZero)
/// but 100 with [`HalfEven`](Self::HalfEven).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Commercial rounding: .5 rounds up for positive amounts.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: .5 rounds to the even neighbour.
    HalfEven,
}

impl RoundingMode {
    /// The matching `rust_decimal` rounding strategy.
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            Self::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Round `value` to `dp` decimal places.
    pub fn round(&self, value: Decimal, dp: u32) -> Decimal {
        value.round_dp_with_strategy(dp, self.strategy())
    }
}

/// Runtime options for document totals.
///
/// Deserializes from partial input, e.g. `{}` or
/// `{"grand_total_rounding": "half_even"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalsConfig {
    /// Rounding applied when producing the whole-rupee grand total.
    pub grand_total_rounding: RoundingMode,
}

impl TotalsConfig {
    /// Set the grand-total rounding mode.
    pub fn with_rounding(mut self, mode: RoundingMode) -> Self {
        self.grand_total_rounding = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn modes_agree_off_midpoint() {
        for mode in [RoundingMode::HalfAwayFromZero, RoundingMode::HalfEven] {
            assert_eq!(mode.round(dec!(100.49), 0), dec!(100));
            assert_eq!(mode.round(dec!(100.51), 0), dec!(101));
        }
    }

    #[test]
    fn modes_diverge_at_midpoint() {
        assert_eq!(RoundingMode::HalfAwayFromZero.round(dec!(100.5), 0), dec!(101));
        assert_eq!(RoundingMode::HalfEven.round(dec!(100.5), 0), dec!(100));
        assert_eq!(RoundingMode::HalfEven.round(dec!(101.5), 0), dec!(102));
    }

    #[test]
    fn default_is_half_away_from_zero() {
        assert_eq!(
            TotalsConfig::default().grand_total_rounding,
            RoundingMode::HalfAwayFromZero
        );
    }
}
