//! Concrete adapter implementations for ports.

pub mod csv_ratio_adapter;
pub mod sequence_adapter;
pub mod file_config_adapter;
pub mod text_report;
pub mod snapshot_csv;
pub mod chart_svg;
