//! Clipping a line to a ROI for drawing.
use super::LineModel;

/// Two drawable endpoints of `line` inside `[0, w−1] × [0, h−1]`.
///
/// Intersections with the four borders are collected; with fewer than two,
/// the ROI centre is projected onto the line and extended by ±(w, h) along
/// the line direction, clamped to the box. The farthest pair wins.
pub fn clip_to_box(line: &LineModel, w: f64, h: f64) -> [[f64; 2]; 2] {
    let LineModel { a, b, c } = *line;
    let eps = 1e-9;
    let x_max = w - 1.0;
    let y_max = h - 1.0;
    let in_range = |v: f64, hi: f64| (0.0..=hi).contains(&v);

    let mut pts: Vec<[f64; 2]> = Vec::with_capacity(4);
    if b.abs() > eps {
        let y0 = -c / b;
        let y1 = -(a * x_max + c) / b;
        if in_range(y0, y_max) {
            pts.push([0.0, y0]);
        }
        if in_range(y1, y_max) {
            pts.push([x_max, y1]);
        }
    }
    if a.abs() > eps {
        let x0 = -c / a;
        let x1 = -(b * y_max + c) / a;
        if in_range(x0, x_max) {
            pts.push([x0, 0.0]);
        }
        if in_range(x1, x_max) {
            pts.push([x1, y_max]);
        }
    }

    if pts.len() < 2 {
        let cx = x_max / 2.0;
        let cy = y_max / 2.0;
        let t = a * cx + b * cy + c;
        let px = cx - a * t;
        let py = cy - b * t;
        let norm = b.hypot(a).max(1e-12);
        let ux = b / norm;
        let uy = -a / norm;
        pts = vec![
            [
                (px - ux * w).clamp(0.0, x_max.max(0.0)),
                (py - uy * h).clamp(0.0, y_max.max(0.0)),
            ],
            [
                (px + ux * w).clamp(0.0, x_max.max(0.0)),
                (py + uy * h).clamp(0.0, y_max.max(0.0)),
            ],
        ];
    }

    let mut best = [pts[0], pts[1]];
    let mut best_d = -1.0;
    for i in 0..pts.len() {
        for j in i + 1..pts.len() {
            let d = (pts[i][0] - pts[j][0]).hypot(pts[i][1] - pts[j][1]);
            if d > best_d {
                best_d = d;
                best = [pts[i], pts[j]];
            }
        }
    }
    best
}
