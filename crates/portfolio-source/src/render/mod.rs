//! Presentation
//!
//! JSON, CSV and chat-report renderers over one [`crate::model::PortfolioSnapshot`].
//! All three round through [`PositionRow`], so every format shows the same
//! 2-decimal values.

mod csv_export;
mod json;
mod report;

pub use csv_export::render_csv;
pub use json::{PortfolioReport, render_json};
pub use report::{EMPTY_PORTFOLIO_MESSAGE, MAX_REPORT_CHARS, render_report};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::model::Position;

/// Round half away from zero to 2 places
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Flat presentation row shared by every renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    pub figi: String,
    pub ticker: Option<String>,
    pub instrument_type: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_rub: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub position_value_rub: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_yield_rub: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_yield_pct: Decimal,
}

impl From<&Position> for PositionRow {
    fn from(position: &Position) -> Self {
        Self {
            figi: position.figi.clone(),
            ticker: position.ticker.clone(),
            instrument_type: position.instrument_type.clone(),
            quantity: position.quantity,
            price_rub: round2(position.price),
            position_value_rub: round2(position.position_value),
            expected_yield_rub: round2(position.expected_yield),
            expected_yield_pct: round2(position.expected_yield_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round2() {
        assert_eq!(round2(dec!(4.975124378)), dec!(4.98));
        assert_eq!(round2(dec!(0.125)), dec!(0.13));
        assert_eq!(round2(dec!(-0.125)), dec!(-0.13));
        assert_eq!(round2(dec!(100.5)), dec!(100.50));
    }

    #[test]
    fn test_reference_row() {
        let pos = Position::new("BBG1", "share", 10, dec!(100.5), dec!(50)).unwrap();
        let row = PositionRow::from(&pos);
        assert_eq!(row.price_rub, dec!(100.50));
        assert_eq!(row.position_value_rub, dec!(1005.00));
        assert_eq!(row.expected_yield_rub, dec!(50.00));
        assert_eq!(row.expected_yield_pct, dec!(4.98));
    }
}
