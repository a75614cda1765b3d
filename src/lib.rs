//! ratiotrader — gold/silver ratio rebalancing simulator.
//!
//! Hexagonal architecture: the pure engine and value types live in [`domain`],
//! port traits in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
