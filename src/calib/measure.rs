//! Millimetre offsets of the two intersections along one ruler.
use crate::ticks::TickSet;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisMeasurement {
    pub axis: String,
    /// Bracketing tick index of the first and second intersection.
    pub tick_index: (usize, usize),
    /// `tick_index.1 − tick_index.0`
    pub index_diff: i64,
    /// Distance past the bracketing tick, in millimetres.
    pub offset1_mm: f64,
    pub offset2_mm: f64,
}

impl AxisMeasurement {
    /// Fused distance for a ruler whose ticks are `pitch_mm` apart:
    /// `index_diff × pitch + offset2 − offset1`.
    pub fn combined_mm(&self, pitch_mm: f64) -> f64 {
        self.index_diff as f64 * pitch_mm + self.offset2_mm - self.offset1_mm
    }
}

/// Locate `c1` and `c2` against `ticks`. The bracketing tick of a
/// coordinate is the last one strictly below it (index 0 if none).
/// `None` for an empty tick set.
pub fn measure_axis(
    c1: i32,
    c2: i32,
    ticks: &TickSet,
    pixels_per_mm: f64,
    axis: &str,
) -> Option<AxisMeasurement> {
    let t = ticks.as_slice();
    if t.is_empty() {
        return None;
    }
    let i1 = ticks.bracket_index(c1);
    let i2 = ticks.bracket_index(c2);
    Some(AxisMeasurement {
        axis: axis.to_string(),
        tick_index: (i1, i2),
        index_diff: i2 as i64 - i1 as i64,
        offset1_mm: (c1 - t[i1]) as f64 / pixels_per_mm,
        offset2_mm: (c2 - t[i2]) as f64 / pixels_per_mm,
    })
}
