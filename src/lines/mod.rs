//! Robust reference lines inside a region of interest.
//!
//! Edge pixels of the ROI feed two independent RANSAC searches, one gated
//! to near-horizontal and one to near-vertical directions. The inliers of
//! each winning hypothesis are refit by total least squares, clipped to the
//! ROI for drawing and intersected.

pub mod clip;
pub mod fit;
pub mod ransac;
pub mod tls;

pub use fit::{fit_roi_lines, intersect, RoiLines};
pub use ransac::RansacParams;

use crate::angle::segment_angle_deg;
use serde::Serialize;

/// Direction class a line search is gated to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineOrientation {
    Horizontal,
    Vertical,
}

impl LineOrientation {
    pub fn name(self) -> &'static str {
        match self {
            LineOrientation::Horizontal => "horizontal",
            LineOrientation::Vertical => "vertical",
        }
    }
}

/// Line `a·x + b·y + c = 0` with a unit normal `(a, b)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LineModel {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineModel {
    /// Line through two points; `None` when they coincide.
    pub fn through(p: [f64; 2], q: [f64; 2]) -> Option<Self> {
        let vx = q[0] - p[0];
        let vy = q[1] - p[1];
        let (na, nb) = (-vy, vx);
        let norm = na.hypot(nb);
        if norm < 1e-9 {
            return None;
        }
        let a = na / norm;
        let b = nb / norm;
        Some(Self {
            a,
            b,
            c: -(a * p[0] + b * p[1]),
        })
    }

    /// Signed orthogonal distance of `p`.
    #[inline]
    pub fn signed_distance(&self, p: [f64; 2]) -> f64 {
        self.a * p[0] + self.b * p[1] + self.c
    }

    /// Same line after moving the coordinate origin by `(-dx, -dy)`, i.e.
    /// from ROI-local to image coordinates when `(dx, dy)` is the ROI origin.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            a: self.a,
            b: self.b,
            c: self.c - self.a * dx - self.b * dy,
        }
    }

    /// Unit direction vector `(b, −a)`.
    pub fn direction(&self) -> [f64; 2] {
        [self.b, -self.a]
    }

    /// Direction angle in degrees, folded into `[0, 180)`.
    pub fn angle_deg(&self) -> f64 {
        let d = self.direction();
        segment_angle_deg([0.0, 0.0], d)
    }
}

/// A fitted reference line with its drawable segment.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFit {
    pub orientation: LineOrientation,
    /// Model in image coordinates.
    pub model: LineModel,
    pub inliers: usize,
    /// RMS orthogonal residual of the inliers under the refit model.
    pub rms_residual: f64,
    /// Segment endpoints in image coordinates.
    pub endpoints: [[f64; 2]; 2],
}
