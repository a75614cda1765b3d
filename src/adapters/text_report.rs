//! Plain-text report adapter implementing ReportPort.
//!
//! Sections: final holdings, run summary, transaction log (one line per
//! swap) and, when prices are supplied, the valuation line.

use crate::domain::error::RatioError;
use crate::domain::simulator::{TradeSignal, TransactionRecord};
use crate::domain::valuation;
use crate::ports::report_port::{ReportPort, SimulationReport};

pub struct TextReportAdapter;

/// One human-readable line for a swap.
pub fn format_transaction(tx: &TransactionRecord) -> String {
    let label = match tx.signal {
        TradeSignal::HighRatio => "High ratio",
        TradeSignal::LowRatio => "Low ratio",
    };
    format!(
        "{} {}: swapped {:.2} oz {} for {:.2} oz {}.",
        label,
        tx.ratio,
        tx.sold_quantity,
        tx.sold(),
        tx.bought_quantity,
        tx.bought()
    )
}

/// Two decimals with `,` thousands separators, e.g. `40,250.00`.
pub fn format_grouped(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &SimulationReport) -> Result<String, RatioError> {
        let final_holdings = &report.result.final_holdings;
        let summary = report.summary;
        let mut out = String::new();

        out.push_str("=== Final Result ===\n");
        out.push_str(&format!("Final gold:         {:.2} oz\n", final_holdings.gold));
        out.push_str(&format!("Final silver:       {:.2} oz\n", final_holdings.silver));
        out.push_str(&format!("Total metal units:  {:.2}\n", final_holdings.total()));

        out.push_str("\n=== Summary ===\n");
        out.push_str(&format!(
            "Thresholds:         high {} / low {}, trade {}%\n",
            report.params.threshold_high, report.params.threshold_low, report.params.trade_percent
        ));
        out.push_str(&format!("Steps:              {}\n", summary.steps));
        out.push_str(&format!("High-ratio trades:  {}\n", summary.high_ratio_trades));
        out.push_str(&format!("Low-ratio trades:   {}\n", summary.low_ratio_trades));
        out.push_str(&format!(
            "Change in units:    {:+.2}\n",
            summary.total_change()
        ));

        out.push_str("\n=== Transaction Log ===\n");
        if report.result.transactions.is_empty() {
            out.push_str("No trades executed.\n");
        }
        for tx in &report.result.transactions {
            out.push_str(&format!("- {}\n", format_transaction(tx)));
        }

        if let Some(prices) = &report.prices {
            let total = valuation::value(final_holdings, prices);
            out.push_str("\n=== Valuation ===\n");
            out.push_str(&format!(
                "Gold {}/oz, silver {}/oz: {} USD\n",
                format_grouped(prices.gold),
                format_grouped(prices.silver),
                format_grouped(total)
            ));
        }

        Ok(out)
    }
}
