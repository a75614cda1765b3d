//! Two-asset holdings state.

use crate::domain::error::RatioError;

/// Quantities of the two interchangeable assets, in a consistent unit (troy ounces).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Holdings {
    pub gold: f64,
    pub silver: f64,
}

impl Holdings {
    pub fn new(gold: f64, silver: f64) -> Self {
        Holdings { gold, silver }
    }

    /// Build holdings, rejecting negative or non-finite quantities.
    pub fn checked(gold: f64, silver: f64) -> Result<Self, RatioError> {
        let holdings = Holdings::new(gold, silver);
        holdings.validate()?;
        Ok(holdings)
    }

    pub fn validate(&self) -> Result<(), RatioError> {
        let ok = |q: f64| q.is_finite() && q >= 0.0;
        if ok(self.gold) && ok(self.silver) {
            Ok(())
        } else {
            Err(RatioError::InvalidHoldings {
                gold: self.gold,
                silver: self.silver,
            })
        }
    }

    /// Total metal units: gold + silver.
    pub fn total(&self) -> f64 {
        self.gold + self.silver
    }
}
