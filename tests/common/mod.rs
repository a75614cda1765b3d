#![allow(dead_code)]

use ratiotrader::domain::error::RatioError;
use ratiotrader::domain::holdings::Holdings;
use ratiotrader::domain::simulator::SimulationParams;
use ratiotrader::ports::ratio_port::RatioSource;
use std::io::Write;

pub struct MockRatioSource {
    pub ratios: Vec<f64>,
    pub error: Option<String>,
}

impl MockRatioSource {
    pub fn new(ratios: Vec<f64>) -> Self {
        Self {
            ratios,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            ratios: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl RatioSource for MockRatioSource {
    fn load_ratios(&self) -> Result<Vec<f64>, RatioError> {
        match &self.error {
            Some(reason) => Err(RatioError::MalformedInput {
                source_name: "mock".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(self.ratios.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn default_holdings() -> Holdings {
    Holdings::new(10.0, 800.0)
}

pub fn default_params() -> SimulationParams {
    SimulationParams::new(90.0, 50.0, 10.0)
}

pub fn write_temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
