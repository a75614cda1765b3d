//! Report generation port trait.

use std::fs;
use std::path::Path;

use crate::domain::error::RatioError;
use crate::domain::simulator::{SimulationParams, SimulationResult};
use crate::domain::summary::SimulationSummary;
use crate::domain::valuation::Prices;

/// Everything a report renderer needs from a finished run.
pub struct SimulationReport<'a> {
    pub params: &'a SimulationParams,
    pub result: &'a SimulationResult,
    pub summary: &'a SimulationSummary,
    pub prices: Option<Prices>,
}

pub trait ReportPort {
    fn render(&self, report: &SimulationReport) -> Result<String, RatioError>;

    /// Default implementation: render then write the whole output to `output_path`.
    fn write(&self, report: &SimulationReport, output_path: &Path) -> Result<(), RatioError> {
        let content = self.render(report)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}
