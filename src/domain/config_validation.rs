//! Configuration validation.
//!
//! Checks every numeric key that is present before a simulation runs. Missing
//! keys are fine; they fall back to defaults when the run is assembled.

use crate::domain::error::RatioError;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), RatioError> {
    validate_holdings(config)?;
    validate_thresholds(config)?;
    validate_trade_percent(config)?;
    validate_input(config)?;
    validate_prices(config)?;
    Ok(())
}

/// Parse a key that, if present, must be a finite number.
fn optional_number(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, RatioError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(RatioError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("'{}' is not a finite number", raw.trim()),
        }),
    }
}

fn require_non_negative(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), RatioError> {
    if let Some(v) = optional_number(config, section, key)? {
        if v < 0.0 {
            return Err(RatioError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("{key} must be non-negative"),
            });
        }
    }
    Ok(())
}

fn validate_holdings(config: &dyn ConfigPort) -> Result<(), RatioError> {
    require_non_negative(config, "portfolio", "gold")?;
    require_non_negative(config, "portfolio", "silver")
}

fn validate_thresholds(config: &dyn ConfigPort) -> Result<(), RatioError> {
    optional_number(config, "strategy", "threshold_high")?;
    optional_number(config, "strategy", "threshold_low")?;
    Ok(())
}

fn validate_trade_percent(config: &dyn ConfigPort) -> Result<(), RatioError> {
    if let Some(v) = optional_number(config, "strategy", "trade_percent")? {
        if !(0.0..=100.0).contains(&v) {
            return Err(RatioError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "trade_percent".to_string(),
                reason: "trade_percent must be between 0 and 100".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_input(config: &dyn ConfigPort) -> Result<(), RatioError> {
    if let Some(d) = config.get_string("input", "delimiter") {
        if d.chars().count() != 1 {
            return Err(RatioError::ConfigInvalid {
                section: "input".to_string(),
                key: "delimiter".to_string(),
                reason: "delimiter must be a single character".to_string(),
            });
        }
    }
    if let Some(h) = config.get_string("input", "has_header") {
        if !matches!(
            h.trim().to_lowercase().as_str(),
            "true" | "yes" | "1" | "false" | "no" | "0"
        ) {
            return Err(RatioError::ConfigInvalid {
                section: "input".to_string(),
                key: "has_header".to_string(),
                reason: "has_header must be true or false".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_prices(config: &dyn ConfigPort) -> Result<(), RatioError> {
    require_non_negative(config, "valuation", "gold_price")?;
    require_non_negative(config, "valuation", "silver_price")
}
