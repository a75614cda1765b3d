//! Delimiter-separated text ratio source, e.g. `"80, 85, 90"`.

use crate::domain::error::RatioError;
use crate::ports::ratio_port::RatioSource;

pub const DEFAULT_SEQUENCE: &str = "80,85,90,95,100,90,80,70,60,50,45,55";

pub struct SequenceAdapter {
    text: String,
    delimiter: char,
}

impl SequenceAdapter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delimiter: ',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for SequenceAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE)
    }
}

/// Split on `delimiter`, trim each token and parse it as a real.
///
/// Blank input yields an empty sequence; a blank token between delimiters is malformed.
pub fn parse_sequence(text: &str, delimiter: char) -> Result<Vec<f64>, RatioError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(delimiter)
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| RatioError::MalformedInput {
                source_name: "sequence".to_string(),
                reason: format!("token {} '{}' is not a number", i + 1, token),
            })
        })
        .collect()
}

impl RatioSource for SequenceAdapter {
    fn load_ratios(&self) -> Result<Vec<f64>, RatioError> {
        parse_sequence(&self.text, self.delimiter)
    }

    fn describe(&self) -> String {
        "inline sequence".to_string()
    }
}
