use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PositionRow, round2};
use crate::error::Result;
use crate::model::PortfolioSnapshot;

/// Body of `GET /portfolio`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_value_rub: Option<Decimal>,
    pub positions: Vec<PositionRow>,
}

impl From<&PortfolioSnapshot> for PortfolioReport {
    fn from(snapshot: &PortfolioSnapshot) -> Self {
        Self {
            total_value_rub: snapshot.total_value.map(round2),
            positions: snapshot.positions.iter().map(PositionRow::from).collect(),
        }
    }
}

pub fn render_json(snapshot: &PortfolioSnapshot) -> Result<String> {
    Ok(serde_json::to_string(&PortfolioReport::from(snapshot))?)
}
