//! Ruler tick detection and spacing repair.
//!
//! A ruler crop is collapsed into a 1D darkness profile, peaks of the
//! smoothed profile become tick candidates, and the candidate set is thinned
//! and refined into integer tick centres ([`detect_ticks`]). The repair stage
//! inspects consecutive spacings, refuses sets with abnormally small gaps and
//! fills large gaps by interpolation ([`repair_spacing`]).

pub mod detect;
pub mod otsu;
pub mod peaks;
pub mod profile;
pub mod repair;

pub use detect::{detect_ticks, TickParams};
pub use repair::{repair_spacing, RepairParams, SpacingStats};

use serde::{Deserialize, Serialize};

/// Layout of the ruler inside a crop.
///
/// A horizontal ruler runs along x and carries vertical tick marks, so its
/// profile is taken per column. A vertical ruler runs along y and carries
/// horizontal marks, profiled per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulerOrientation {
    Horizontal,
    Vertical,
}

/// Strictly increasing, duplicate-free tick coordinates along one axis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TickSet(Vec<i32>);

impl TickSet {
    /// Sort and de-duplicate arbitrary positions.
    pub fn from_positions(mut positions: Vec<i32>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        Self(positions)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &i32> {
        self.0.iter()
    }

    /// Same ticks translated by `by` (crop-local to image coordinates).
    pub fn offset(&self, by: i32) -> Self {
        Self(self.0.iter().map(|&t| t + by).collect())
    }

    /// Differences between consecutive ticks.
    pub fn gaps(&self) -> Vec<i32> {
        self.0.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Mean consecutive spacing; `None` with fewer than two ticks.
    pub fn mean_spacing(&self) -> Option<f64> {
        if self.0.len() < 2 {
            return None;
        }
        let sum: i64 = self.gaps().iter().map(|&g| g as i64).sum();
        Some(sum as f64 / (self.0.len() - 1) as f64)
    }

    /// Index of the last tick strictly below `c`, or 0 when there is none.
    pub fn bracket_index(&self, c: i32) -> usize {
        self.0.partition_point(|&t| t < c).saturating_sub(1)
    }
}
