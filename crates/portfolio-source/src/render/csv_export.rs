use super::PositionRow;
use crate::error::{Result, SourceError};
use crate::model::PortfolioSnapshot;

/// Header-only body for a portfolio without positions
const EMPTY_CSV_HEADER: &str = "position_count";

pub fn render_csv(snapshot: &PortfolioSnapshot) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if snapshot.is_empty() {
        writer.write_record([EMPTY_CSV_HEADER])?;
        writer.write_record(["0"])?;
    } else {
        for position in &snapshot.positions {
            writer.serialize(PositionRow::from(position))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SourceError::Internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| SourceError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;
    use crate::render::render_json;
    use rust_decimal_macros::dec;

    fn sample() -> PortfolioSnapshot {
        PortfolioSnapshot {
            account_id: Some("acc".into()),
            total_value: Some(dec!(2000)),
            positions: vec![
                Position::new("BBG1", "share", 10, dec!(100.5), dec!(50)).unwrap().with_ticker("SBER"),
                Position::new("BBG2", "bond", 3, dec!(999.999), dec!(-1.234)).unwrap(),
                Position::new("BBG3", "etf", 7, dec!(0), dec!(3)).unwrap(),
            ],
        }
    }

    #[test]
    fn test_header_and_rows() {
        let csv = render_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(
                "figi,ticker,instrument_type,quantity,price_rub,position_value_rub,expected_yield_rub,expected_yield_pct"
            )
        );
        assert!(lines.next().unwrap().starts_with("BBG1,SBER,share,10,100.5,"));
        assert!(lines.next().unwrap().starts_with("BBG2,,bond,3,"));
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_empty_portfolio() {
        let csv = render_csv(&PortfolioSnapshot::empty()).unwrap();
        assert_eq!(csv, "position_count\n0\n");
    }

    #[test]
    fn test_csv_matches_json() {
        let snapshot = sample();
        let json: serde_json::Value = serde_json::from_str(&render_json(&snapshot).unwrap()).unwrap();
        let csv = render_csv(&snapshot).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), snapshot.positions.len());

        for (record, json_row) in records.iter().zip(json["positions"].as_array().unwrap()) {
            for (field, cell) in headers.iter().zip(record.iter()) {
                let expected = &json_row[field];
                match expected {
                    serde_json::Value::Null => assert_eq!(cell, "", "{field}"),
                    serde_json::Value::String(s) => assert_eq!(cell, s, "{field}"),
                    serde_json::Value::Number(n) => {
                        let parsed: f64 = cell.parse().unwrap();
                        assert!((parsed - n.as_f64().unwrap()).abs() < 1e-9, "{field}");
                    }
                    other => panic!("unexpected JSON value for {field}: {other}"),
                }
            }
        }
    }
}
