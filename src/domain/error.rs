//! Domain error types.

/// Top-level error type for ratiotrader.
#[derive(Debug, thiserror::Error)]
pub enum RatioError {
    #[error("invalid ratio {ratio} at step {step}")]
    InvalidRatio { step: usize, ratio: f64 },

    #[error("invalid trade percent {value}: must be between 0 and 100")]
    InvalidTradePercent { value: f64 },

    #[error("invalid threshold {name} = {value}: must be a finite number")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("invalid holdings: gold {gold}, silver {silver} (must be non-negative)")]
    InvalidHoldings { gold: f64, silver: f64 },

    #[error("malformed input from {source_name}: {reason}")]
    MalformedInput { source_name: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("csv error: {reason}")]
    Csv { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for RatioError {
    fn from(err: csv::Error) -> Self {
        RatioError::Csv {
            reason: err.to_string(),
        }
    }
}

impl From<&RatioError> for std::process::ExitCode {
    fn from(err: &RatioError) -> Self {
        let code: u8 = match err {
            RatioError::Io(_) | RatioError::Csv { .. } => 1,
            RatioError::ConfigParse { .. }
            | RatioError::ConfigMissing { .. }
            | RatioError::ConfigInvalid { .. } => 2,
            RatioError::MalformedInput { .. } => 3,
            RatioError::InvalidRatio { .. }
            | RatioError::InvalidTradePercent { .. }
            | RatioError::InvalidThreshold { .. }
            | RatioError::InvalidHoldings { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
