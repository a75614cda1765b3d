//! CSV ratio file adapter.
//!
//! Reads the first column of a tabular file, one ratio per row, in file order.
//! Any further columns (dates, prices) are ignored.

use crate::domain::error::RatioError;
use crate::ports::ratio_port::RatioSource;
use std::fs;
use std::io;
use std::path::PathBuf;

pub struct CsvRatioAdapter {
    path: PathBuf,
    has_header: bool,
}

impl CsvRatioAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            has_header: true,
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    fn malformed(&self, reason: String) -> RatioError {
        RatioError::MalformedInput {
            source_name: self.path.display().to_string(),
            reason,
        }
    }
}

impl RatioSource for CsvRatioAdapter {
    fn load_ratios(&self) -> Result<Vec<f64>, RatioError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => self.malformed("file is not valid UTF-8".to_string()),
            _ => RatioError::Io(e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut ratios = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| self.malformed(format!("CSV parse error: {e}")))?;
            let line = record.position().map_or(0, |p| p.line());

            let cell = match record.get(0) {
                Some(c) if !c.is_empty() => c,
                _ => return Err(self.malformed(format!("line {line}: missing ratio value"))),
            };
            let ratio: f64 = cell
                .parse()
                .map_err(|_| self.malformed(format!("line {line}: '{cell}' is not a number")))?;
            ratios.push(ratio);
        }

        Ok(ratios)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
