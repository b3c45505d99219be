//! Chat report: a header line plus a monospace table, Telegram HTML.

use rust_decimal::Decimal;
use teloxide::utils::html;

use super::round2;
use crate::model::{PortfolioSnapshot, Position};

pub const EMPTY_PORTFOLIO_MESSAGE: &str = "📭 Portfolio is empty.";

/// Telegram's message length limit
pub const MAX_REPORT_CHARS: usize = 4096;

const LABEL_WIDTH: usize = 12;

fn money(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

fn header(total: Option<Decimal>) -> String {
    let total = total.map_or_else(|| "n/a".to_string(), |v| format!("{} RUB", money(v)));
    format!("💼 {}\nTotal value: {}\n", html::bold("Portfolio"), html::bold(&total))
}

fn table_row(position: &Position) -> String {
    let label: String = position.label().chars().take(LABEL_WIDTH).collect();
    let padded = format!("{label:<width$}", width = LABEL_WIDTH);
    format!(
        "{} {:>6} {:>10} {:>11} {:>9} {:>7}\n",
        html::escape(&padded),
        position.quantity,
        money(position.price),
        money(position.position_value),
        money(position.expected_yield),
        money(position.expected_yield_pct),
    )
}

pub fn render_report(snapshot: &PortfolioSnapshot) -> String {
    if snapshot.is_empty() {
        return EMPTY_PORTFOLIO_MESSAGE.to_string();
    }

    let mut out = header(snapshot.total_value);
    out.push_str("<pre>");
    out.push_str(&format!(
        "{:<width$} {:>6} {:>10} {:>11} {:>9} {:>7}\n",
        "Ticker",
        "Qty",
        "Price",
        "Value",
        "Yield",
        "Yield%",
        width = LABEL_WIDTH
    ));

    // Reserve room for the closing tag and a truncation note.
    let budget = MAX_REPORT_CHARS - 64;
    let mut used = out.chars().count();
    let mut shown = 0;
    for position in &snapshot.positions {
        let row = table_row(position);
        let len = row.chars().count();
        if used + len > budget {
            break;
        }
        out.push_str(&row);
        used += len;
        shown += 1;
    }
    out.push_str("</pre>");

    let hidden = snapshot.positions.len() - shown;
    if hidden > 0 {
        out.push_str(&format!("\n… and {hidden} more positions"));
    }
    out
}
