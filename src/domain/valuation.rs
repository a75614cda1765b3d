//! Post-run valuation of final holdings at caller-supplied unit prices.

use crate::domain::error::RatioError;
use crate::domain::holdings::Holdings;

/// Unit prices, e.g. USD per ounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prices {
    pub gold: f64,
    pub silver: f64,
}

impl Default for Prices {
    fn default() -> Self {
        Prices {
            gold: 2000.0,
            silver: 25.0,
        }
    }
}

impl Prices {
    pub fn new(gold: f64, silver: f64) -> Result<Self, RatioError> {
        for (key, price) in [("gold_price", gold), ("silver_price", silver)] {
            if !price.is_finite() || price < 0.0 {
                return Err(RatioError::ConfigInvalid {
                    section: "valuation".to_string(),
                    key: key.to_string(),
                    reason: format!("{key} must be a non-negative number"),
                });
            }
        }
        Ok(Prices { gold, silver })
    }
}

pub fn value(holdings: &Holdings, prices: &Prices) -> f64 {
    holdings.gold * prices.gold + holdings.silver * prices.silver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_final_holdings() {
        let h = Holdings::new(9.0, 890.0);
        let p = Prices::new(2000.0, 25.0).unwrap();
        assert!((value(&h, &p) - 40_250.0).abs() < 1e-9);
    }

    #[test]
    fn zero_prices_value_to_zero() {
        let h = Holdings::new(9.0, 890.0);
        assert_eq!(value(&h, &Prices::new(0.0, 0.0).unwrap()), 0.0);
    }

    #[test]
    fn negative_price_rejected() {
        let err = Prices::new(2000.0, -1.0).unwrap_err();
        assert!(matches!(err, RatioError::ConfigInvalid { key, .. } if key == "silver_price"));
    }

    #[test]
    fn default_prices() {
        let p = Prices::default();
        assert_eq!(p.gold, 2000.0);
        assert_eq!(p.silver, 25.0);
    }
}
