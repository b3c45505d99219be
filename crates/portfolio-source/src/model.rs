//! Domain Models
//!
//! Money, positions and the per-request portfolio snapshot.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SourceError};

/// Nano-units in one whole unit
const NANO_SCALE: u32 = 9;

/// Fixed-point money value as sent by the brokerage: whole units plus a
/// nano-fraction with the same sign. Quotations (quantities, yields) share
/// this shape without a currency.
///
/// The REST gateway omits zero fields and encodes `units` as a string, so
/// both fields default to 0 and `units` accepts a string or a number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, deserialize_with = "de_flexible_i64")]
    pub units: i64,

    #[serde(default)]
    pub nano: i32,
}

impl MoneyValue {
    pub fn new(units: i64, nano: i32) -> Self {
        Self {
            currency: None,
            units,
            nano,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Exact decimal value: `units + nano / 1e9`
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.units) + Decimal::new(i64::from(self.nano), NANO_SCALE)
    }
}

/// Convert an optional money value, treating absence as zero
pub fn money_to_decimal(value: Option<&MoneyValue>) -> Decimal {
    value.map_or(Decimal::ZERO, MoneyValue::to_decimal)
}

fn de_flexible_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Number(i64),
        Text(String),
    }

    match Flexible::deserialize(deserializer)? {
        Flexible::Number(v) => Ok(v),
        Flexible::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Yield as a percentage of position value; 0 when the value is 0.
/// `None` when the percentage does not fit in a `Decimal`.
pub fn yield_percent(expected_yield: Decimal, position_value: Decimal) -> Option<Decimal> {
    if position_value.is_zero() {
        return Some(Decimal::ZERO);
    }
    expected_yield
        .checked_div(position_value)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// A held instrument with derived values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Financial Instrument Global Identifier
    pub figi: String,

    /// Exchange ticker, when the brokerage supplies one
    pub ticker: Option<String>,

    /// Instrument type (share, bond, etf, currency, ...)
    pub instrument_type: String,

    /// Whole units held
    pub quantity: i64,

    /// Current price per unit
    pub price: Decimal,

    /// price × quantity
    pub position_value: Decimal,

    /// Expected yield reported by the brokerage
    pub expected_yield: Decimal,

    /// expected_yield ÷ position_value × 100
    pub expected_yield_pct: Decimal,
}

impl Position {
    /// Fails with [`SourceError::Api`] when the brokerage values overflow the
    /// derived fields.
    pub fn new(
        figi: impl Into<String>,
        instrument_type: impl Into<String>,
        quantity: i64,
        price: Decimal,
        expected_yield: Decimal,
    ) -> Result<Self> {
        let figi = figi.into();
        let out_of_range = || SourceError::Api(format!("position {figi} values are out of range"));

        let position_value = price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(out_of_range)?;
        let expected_yield_pct =
            yield_percent(expected_yield, position_value).ok_or_else(out_of_range)?;

        Ok(Self {
            figi,
            ticker: None,
            instrument_type: instrument_type.into(),
            quantity,
            price,
            position_value,
            expected_yield,
            expected_yield_pct,
        })
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Ticker if known, figi otherwise
    pub fn label(&self) -> &str {
        self.ticker.as_deref().unwrap_or(&self.figi)
    }
}

/// Portfolio state for one request
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Account the snapshot was taken from
    pub account_id: Option<String>,

    /// Portfolio-level total, if the brokerage reported one
    pub total_value: Option<Decimal>,

    /// Non-empty positions in upstream order
    pub positions: Vec<Position>,
}

impl PortfolioSnapshot {
    /// Snapshot for a token with no accounts
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_conversion() {
        assert_eq!(MoneyValue::new(100, 500_000_000).to_decimal(), dec!(100.5));
        assert_eq!(MoneyValue::new(0, 1).to_decimal(), dec!(0.000000001));
        assert_eq!(MoneyValue::new(-3, -250_000_000).to_decimal(), dec!(-3.25));
        assert_eq!(MoneyValue::new(0, -999_999_999).to_decimal(), dec!(-0.999999999));
        assert_eq!(
            MoneyValue::new(i64::from(i32::MAX), 999_999_999).to_decimal(),
            dec!(2147483647.999999999)
        );
    }

    #[test]
    fn test_absent_money_is_zero() {
        assert_eq!(money_to_decimal(None), Decimal::ZERO);
        assert_eq!(money_to_decimal(Some(&MoneyValue::new(7, 0))), dec!(7));
    }

    #[test]
    fn test_wire_units_as_string_or_number() {
        let v: MoneyValue =
            serde_json::from_str(r#"{"currency":"rub","units":"1234","nano":560000000}"#).unwrap();
        assert_eq!(v.to_decimal(), dec!(1234.56));
        assert_eq!(v.currency.as_deref(), Some("rub"));

        let v: MoneyValue = serde_json::from_str(r#"{"units":-5}"#).unwrap();
        assert_eq!(v.to_decimal(), dec!(-5));

        let v: MoneyValue = serde_json::from_str("{}").unwrap();
        assert_eq!(v.to_decimal(), Decimal::ZERO);
    }

    #[test]
    fn test_position_derived_values() {
        let pos = Position::new("BBG1", "share", 10, dec!(100.5), dec!(50)).unwrap();
        assert_eq!(pos.position_value, dec!(1005.0));
        assert!((pos.expected_yield_pct - dec!(4.975124378)).abs() < dec!(0.000001));
        assert_eq!(pos.label(), "BBG1");
        assert_eq!(pos.with_ticker("SBER").label(), "SBER");
    }

    #[test]
    fn test_zero_value_yield_is_zero() {
        assert_eq!(yield_percent(dec!(1000000), Decimal::ZERO), Some(Decimal::ZERO));
        let pos = Position::new("BBG2", "bond", 3, Decimal::ZERO, dec!(-42)).unwrap();
        assert_eq!(pos.expected_yield_pct, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_values_are_an_error() {
        let tiny_price = MoneyValue::new(0, 1).to_decimal();
        let huge_yield = MoneyValue::new(1_000_000_000_000_000_000, 0).to_decimal();
        assert_eq!(yield_percent(huge_yield, tiny_price), None);

        let err = Position::new("BBG3", "share", 1, tiny_price, huge_yield).unwrap_err();
        assert!(matches!(err, SourceError::Api(ref m) if m.contains("BBG3")));

        let err = Position::new("BBG4", "share", i64::MAX, Decimal::MAX, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, SourceError::Api(_)));
    }
}
