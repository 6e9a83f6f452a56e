//! Angle utilities used by the line search.

/// Direction of the segment `p → q` in degrees, folded into `[0, 180)`.
#[inline]
pub fn segment_angle_deg(p: [f64; 2], q: [f64; 2]) -> f64 {
    let deg = (q[1] - p[1]).atan2(q[0] - p[0]).to_degrees();
    let folded = deg.rem_euclid(180.0);
    if folded >= 180.0 {
        0.0
    } else {
        folded
    }
}

/// True when a direction in `[0, 180)` lies within `tol_deg` of the x axis.
#[inline]
pub fn is_near_horizontal(theta_deg: f64, tol_deg: f64) -> bool {
    theta_deg < tol_deg || theta_deg > 180.0 - tol_deg
}

/// True when a direction in `[0, 180)` lies within `tol_deg` of the y axis.
#[inline]
pub fn is_near_vertical(theta_deg: f64, tol_deg: f64) -> bool {
    (theta_deg - 90.0).abs() <= tol_deg
}
