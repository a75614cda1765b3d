//! CSV export of the per-step snapshot series.

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::domain::error::RatioError;
use crate::domain::simulator::PortfolioSnapshot;

#[derive(Serialize)]
struct SnapshotRow {
    step: usize,
    ratio: f64,
    gold: f64,
    silver: f64,
    total: f64,
}

impl From<&PortfolioSnapshot> for SnapshotRow {
    fn from(s: &PortfolioSnapshot) -> Self {
        SnapshotRow {
            step: s.step,
            ratio: s.ratio,
            gold: s.gold,
            silver: s.silver,
            total: s.total,
        }
    }
}

/// Write `step,ratio,gold,silver,total` rows in snapshot order.
pub fn write_snapshots<W: io::Write>(
    writer: W,
    snapshots: &[PortfolioSnapshot],
) -> Result<(), RatioError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if snapshots.is_empty() {
        wtr.write_record(["step", "ratio", "gold", "silver", "total"])?;
    }
    for snapshot in snapshots {
        wtr.serialize(SnapshotRow::from(snapshot))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_snapshots_to_path(
    path: &Path,
    snapshots: &[PortfolioSnapshot],
) -> Result<(), RatioError> {
    let file = std::fs::File::create(path)?;
    write_snapshots(file, snapshots)
}
