//! Core domain types and the rebalancing engine.

pub mod holdings;
pub mod simulator;
pub mod summary;
pub mod valuation;
pub mod config_validation;
pub mod error;
