//! Threshold rebalancing engine.
//!
//! A single forward pass over a ratio sequence. At every step the current
//! holdings are snapshotted, then at most one swap fires:
//!
//! - `ratio >= threshold_high`: sell `trade_percent`% of gold, buy `sold * ratio` silver.
//! - `ratio <= threshold_low`: sell `trade_percent`% of silver, buy `sold / ratio` gold.
//!
//! The high branch is checked first, so it wins when the thresholds overlap.

use std::fmt;

use crate::domain::error::RatioError;
use crate::domain::holdings::Holdings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Gold,
    Silver,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Gold => write!(f, "gold"),
            Asset::Silver => write!(f, "silver"),
        }
    }
}

/// Which threshold triggered a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSignal {
    HighRatio,
    LowRatio,
}

impl TradeSignal {
    pub fn sold(&self) -> Asset {
        match self {
            TradeSignal::HighRatio => Asset::Gold,
            TradeSignal::LowRatio => Asset::Silver,
        }
    }

    pub fn bought(&self) -> Asset {
        match self {
            TradeSignal::HighRatio => Asset::Silver,
            TradeSignal::LowRatio => Asset::Gold,
        }
    }
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSignal::HighRatio => write!(f, "high-ratio"),
            TradeSignal::LowRatio => write!(f, "low-ratio"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub threshold_high: f64,
    pub threshold_low: f64,
    /// Percentage of the signalling asset swapped per trigger, in `[0, 100]`.
    pub trade_percent: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            threshold_high: 90.0,
            threshold_low: 50.0,
            trade_percent: 10.0,
        }
    }
}

impl SimulationParams {
    pub fn new(threshold_high: f64, threshold_low: f64, trade_percent: f64) -> Self {
        SimulationParams {
            threshold_high,
            threshold_low,
            trade_percent,
        }
    }

    /// Rejects non-finite thresholds and trade percentages outside `[0, 100]`.
    ///
    /// Threshold ordering is not checked; see [`Self::thresholds_degenerate`].
    pub fn validate(&self) -> Result<(), RatioError> {
        for (name, value) in [
            ("threshold_high", self.threshold_high),
            ("threshold_low", self.threshold_low),
        ] {
            if !value.is_finite() {
                return Err(RatioError::InvalidThreshold { name, value });
            }
        }
        if !(0.0..=100.0).contains(&self.trade_percent) {
            return Err(RatioError::InvalidTradePercent {
                value: self.trade_percent,
            });
        }
        Ok(())
    }

    /// True when `threshold_low >= threshold_high`, i.e. some ratios satisfy both branches.
    pub fn thresholds_degenerate(&self) -> bool {
        self.threshold_low >= self.threshold_high
    }

    fn fraction(&self) -> f64 {
        self.trade_percent / 100.0
    }
}

/// One executed swap.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub step: usize,
    pub signal: TradeSignal,
    pub ratio: f64,
    pub sold_quantity: f64,
    pub bought_quantity: f64,
}

impl TransactionRecord {
    pub fn sold(&self) -> Asset {
        self.signal.sold()
    }

    pub fn bought(&self) -> Asset {
        self.signal.bought()
    }
}

/// Holdings as they stood at the start of a step, before that step's swap.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    pub step: usize,
    pub ratio: f64,
    pub gold: f64,
    pub silver: f64,
    pub total: f64,
}

impl PortfolioSnapshot {
    fn capture(step: usize, ratio: f64, holdings: &Holdings) -> Self {
        PortfolioSnapshot {
            step,
            ratio,
            gold: holdings.gold,
            silver: holdings.silver,
            total: holdings.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub holdings: Holdings,
    pub transaction: Option<TransactionRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub initial: Holdings,
    pub final_holdings: Holdings,
    pub transactions: Vec<TransactionRecord>,
    pub snapshots: Vec<PortfolioSnapshot>,
}

/// Apply the rebalancing rule for a single ratio observation.
///
/// Fails with [`RatioError::InvalidRatio`] for a non-finite ratio, or for a
/// non-positive ratio that would trigger a swap.
pub fn step(
    index: usize,
    holdings: Holdings,
    ratio: f64,
    params: &SimulationParams,
) -> Result<StepOutcome, RatioError> {
    if !ratio.is_finite() {
        return Err(RatioError::InvalidRatio { step: index, ratio });
    }

    let signal = if ratio >= params.threshold_high {
        TradeSignal::HighRatio
    } else if ratio <= params.threshold_low {
        TradeSignal::LowRatio
    } else {
        return Ok(StepOutcome {
            holdings,
            transaction: None,
        });
    };

    if ratio <= 0.0 {
        return Err(RatioError::InvalidRatio { step: index, ratio });
    }

    let (next, sold_quantity, bought_quantity) = match signal {
        TradeSignal::HighRatio => {
            let sold = holdings.gold * params.fraction();
            let bought = sold * ratio;
            let next = Holdings::new(holdings.gold - sold, holdings.silver + bought);
            (next, sold, bought)
        }
        TradeSignal::LowRatio => {
            let sold = holdings.silver * params.fraction();
            let bought = sold / ratio;
            let next = Holdings::new(holdings.gold + bought, holdings.silver - sold);
            (next, sold, bought)
        }
    };

    Ok(StepOutcome {
        holdings: next,
        transaction: Some(TransactionRecord {
            step: index,
            signal,
            ratio,
            sold_quantity,
            bought_quantity,
        }),
    })
}

/// Run the rebalancing rule over the whole ratio sequence.
///
/// An invalid ratio aborts the run; no partial result is returned.
pub fn simulate(
    initial: Holdings,
    params: &SimulationParams,
    ratios: &[f64],
) -> Result<SimulationResult, RatioError> {
    initial.validate()?;
    params.validate()?;

    if params.thresholds_degenerate() {
        tracing::warn!(
            threshold_high = params.threshold_high,
            threshold_low = params.threshold_low,
            "threshold_low >= threshold_high; overlapping ratios trade as high-ratio"
        );
    }

    let (final_holdings, transactions, snapshots) = ratios.iter().copied().enumerate().try_fold(
        (initial, Vec::new(), Vec::with_capacity(ratios.len())),
        |(holdings, mut transactions, mut snapshots), (index, ratio)| {
            snapshots.push(PortfolioSnapshot::capture(index, ratio, &holdings));
            let outcome = step(index, holdings, ratio, params)?;
            if let Some(tx) = &outcome.transaction {
                tracing::debug!(
                    step = index,
                    ratio,
                    signal = %tx.signal,
                    sold = tx.sold_quantity,
                    bought = tx.bought_quantity,
                    "swap executed"
                );
            }
            transactions.extend(outcome.transaction);
            Ok::<_, RatioError>((outcome.holdings, transactions, snapshots))
        },
    )?;

    Ok(SimulationResult {
        initial,
        final_holdings,
        transactions,
        snapshots,
    })
}

/// Positional form: `(gold, silver, transactions, snapshots)`.
pub fn simulate_gsr(
    initial_gold: f64,
    initial_silver: f64,
    threshold_high: f64,
    threshold_low: f64,
    trade_percent: f64,
    ratios: &[f64],
) -> Result<(f64, f64, Vec<TransactionRecord>, Vec<PortfolioSnapshot>), RatioError> {
    let params = SimulationParams::new(threshold_high, threshold_low, trade_percent);
    let result = simulate(Holdings::new(initial_gold, initial_silver), &params, ratios)?;
    Ok((
        result.final_holdings.gold,
        result.final_holdings.silver,
        result.transactions,
        result.snapshots,
    ))
}
