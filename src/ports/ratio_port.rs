//! Ratio source port trait.

use crate::domain::error::RatioError;

/// Supplies the ordered ratio sequence fed to the simulator.
///
/// Implementations must preserve source order and surface parse failures as
/// [`RatioError::MalformedInput`].
pub trait RatioSource {
    fn load_ratios(&self) -> Result<Vec<f64>, RatioError>;

    /// Short label used in log lines and error messages.
    fn describe(&self) -> String;
}
