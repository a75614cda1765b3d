//! Running totals for a finished simulation.

use crate::domain::holdings::Holdings;
use crate::domain::simulator::{SimulationResult, TradeSignal};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub initial: Holdings,
    pub final_holdings: Holdings,
    pub steps: usize,
    pub high_ratio_trades: usize,
    pub low_ratio_trades: usize,
}

impl SimulationSummary {
    pub fn compute(result: &SimulationResult) -> Self {
        let high_ratio_trades = result
            .transactions
            .iter()
            .filter(|t| t.signal == TradeSignal::HighRatio)
            .count();

        SimulationSummary {
            initial: result.initial,
            final_holdings: result.final_holdings,
            steps: result.snapshots.len(),
            high_ratio_trades,
            low_ratio_trades: result.transactions.len() - high_ratio_trades,
        }
    }

    pub fn total_trades(&self) -> usize {
        self.high_ratio_trades + self.low_ratio_trades
    }

    /// Change in total metal units from start to finish.
    pub fn total_change(&self) -> f64 {
        self.final_holdings.total() - self.initial.total()
    }
}
