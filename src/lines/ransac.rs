//! Orientation-gated RANSAC over edge points.
use super::{LineModel, LineOrientation};
use crate::angle::{is_near_horizontal, is_near_vertical, segment_angle_deg};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed used by unit-test builds so that line searches are reproducible.
pub const TEST_SEED: u64 = 0x5eed_1234;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacParams {
    pub iterations: usize,
    /// Inlier band half-width in pixels.
    pub eps_px: f64,
    /// Direction tolerance of the orientation gate in degrees.
    pub theta0_deg: f64,
    /// Minimum edge pixels in a ROI before any search is attempted.
    pub min_edge_points: usize,
    /// `Some` seeds the generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RansacParams {
    fn default() -> Self {
        Self {
            iterations: 600,
            eps_px: 2.0,
            theta0_deg: 12.0,
            min_edge_points: 20,
            seed: if cfg!(test) { Some(TEST_SEED) } else { None },
        }
    }
}

impl RansacParams {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn accepts(&self, orientation: LineOrientation, theta_deg: f64) -> bool {
        match orientation {
            LineOrientation::Horizontal => is_near_horizontal(theta_deg, self.theta0_deg),
            LineOrientation::Vertical => is_near_vertical(theta_deg, self.theta0_deg),
        }
    }
}

/// Inlier mask of the best hypothesis gated to `orientation`.
///
/// Each iteration samples two distinct points; pairs whose direction fails
/// the gate are skipped. The hypothesis with the strictly largest inlier
/// count wins. Returns `None` when fewer than two points exist or no
/// hypothesis reaches two inliers.
pub fn ransac_line<R: Rng + ?Sized>(
    points: &[[f64; 2]],
    orientation: LineOrientation,
    params: &RansacParams,
    rng: &mut R,
) -> Option<Vec<bool>> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let mut best_mask: Option<Vec<bool>> = None;
    let mut best_count = 0usize;

    for _ in 0..params.iterations {
        let i = rng.gen_range(0..n);
        let mut j = rng.gen_range(0..n);
        while j == i {
            j = rng.gen_range(0..n);
        }
        let (p, q) = (points[i], points[j]);
        if !params.accepts(orientation, segment_angle_deg(p, q)) {
            continue;
        }
        let Some(model) = LineModel::through(p, q) else {
            continue;
        };
        let mask: Vec<bool> = points
            .iter()
            .map(|&pt| model.signed_distance(pt).abs() < params.eps_px)
            .collect();
        let count = mask.iter().filter(|&&m| m).count();
        if best_mask.is_none() || count > best_count {
            best_count = count;
            best_mask = Some(mask);
        }
    }

    best_mask.filter(|_| best_count >= 2)
}
