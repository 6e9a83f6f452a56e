//! Per-ROI reference line fitting and intersection.
use super::clip::clip_to_box;
use super::ransac::{ransac_line, RansacParams};
use super::tls::fit_tls;
use super::{LineFit, LineModel, LineOrientation};
use crate::diagnostics::DiagnosticLog;
use crate::edges::EdgeMap;
use crate::types::Rect;
use log::debug;
use rand::Rng;
use serde::Serialize;

/// Lines, intersection and diagnostics of one ROI.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiLines {
    pub label: String,
    pub roi: Rect,
    pub edge_points: usize,
    pub horizontal: Option<LineFit>,
    pub vertical: Option<LineFit>,
    /// Crossing of both lines in image coordinates.
    pub intersection: Option<[f64; 2]>,
    pub log: DiagnosticLog,
}

/// Intersection of two lines by Cramer's rule; `None` when
/// `|a1·b2 − a2·b1| < 1e−9`.
pub fn intersect(l1: &LineModel, l2: &LineModel) -> Option<[f64; 2]> {
    let det = l1.a * l2.b - l2.a * l1.b;
    if det.abs() < 1e-9 {
        return None;
    }
    let x = (l1.b * l2.c - l2.b * l1.c) / det;
    let y = (l2.a * l1.c - l1.a * l2.c) / det;
    Some([x, y])
}

fn fit_one<R: Rng + ?Sized>(
    points: &[[f64; 2]],
    orientation: LineOrientation,
    roi: Rect,
    params: &RansacParams,
    rng: &mut R,
) -> Option<LineFit> {
    let mask = ransac_line(points, orientation, params, rng)?;
    let inliers: Vec<[f64; 2]> = points
        .iter()
        .zip(&mask)
        .filter(|(_, &m)| m)
        .map(|(&p, _)| p)
        .collect();
    let (local, rms) = fit_tls(&inliers)?;
    let [p, q] = clip_to_box(&local, roi.width as f64, roi.height as f64);
    let (ox, oy) = (roi.x as f64, roi.y as f64);
    Some(LineFit {
        orientation,
        model: local.translated(ox, oy),
        inliers: inliers.len(),
        rms_residual: rms,
        endpoints: [[p[0] + ox, p[1] + oy], [q[0] + ox, q[1] + oy]],
    })
}

/// Fit one near-horizontal and one near-vertical line to the edge pixels of
/// `roi` and intersect them. `roi` is first clamped to the edge map; the
/// returned [`RoiLines::roi`] is the clamped rectangle.
///
/// With fewer than `min_edge_points` edge pixels nothing is fitted and a
/// single warning is logged. Each orientation that finds no line logs a
/// warning of its own; parallel lines log a warning instead of an
/// intersection.
pub fn fit_roi_lines<R: Rng + ?Sized>(
    edges: &EdgeMap,
    roi: Rect,
    label: &str,
    params: &RansacParams,
    rng: &mut R,
) -> RoiLines {
    // edge points come back local to the clamped rectangle
    let roi = roi.clamp_to(edges.w as i32, edges.h as i32);
    let mut log = DiagnosticLog::new();
    let points = edges.points_in(roi);
    let mut out = RoiLines {
        label: label.to_string(),
        roi,
        edge_points: points.len(),
        horizontal: None,
        vertical: None,
        intersection: None,
        log: DiagnosticLog::new(),
    };

    if points.len() < params.min_edge_points {
        log.warn(format!(
            "{label}: {} edge pixels in ROI (need {}), line search skipped",
            points.len(),
            params.min_edge_points
        ));
        out.log = log;
        return out;
    }

    for orientation in [LineOrientation::Horizontal, LineOrientation::Vertical] {
        let fit = fit_one(&points, orientation, roi, params, rng);
        match &fit {
            Some(f) => debug!(
                "{label}: {} line angle {:.2} deg, {} inliers, rms {:.3} px",
                orientation.name(),
                f.model.angle_deg(),
                f.inliers,
                f.rms_residual
            ),
            None => log.warn(format!(
                "{label}: no {} line found (fewer than 2 inliers)",
                orientation.name()
            )),
        }
        match orientation {
            LineOrientation::Horizontal => out.horizontal = fit,
            LineOrientation::Vertical => out.vertical = fit,
        }
    }

    if let (Some(h), Some(v)) = (&out.horizontal, &out.vertical) {
        match intersect(&h.model, &v.model) {
            Some(p) => {
                log.info(format!(
                    "{label}: intersection (global) x={:.1}, y={:.1}",
                    p[0], p[1]
                ));
                out.intersection = Some(p);
            }
            None => log.warn(format!(
                "{label}: lines are nearly parallel, no intersection"
            )),
        }
    }
    out.log = log;
    out
}
