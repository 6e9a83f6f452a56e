//! Total least squares line refit.
use super::LineModel;
use nalgebra::DMatrix;

/// Orthogonal-regression line through `points` and the RMS orthogonal
/// residual of those points. Needs at least two points.
///
/// The centred N×2 point matrix is decomposed by SVD; the right singular
/// vector of the largest singular value is the line direction and its
/// perpendicular the normal.
pub fn fit_tls(points: &[[f64; 2]]) -> Option<(LineModel, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let centred = DMatrix::from_fn(points.len(), 2, |r, c| {
        if c == 0 {
            points[r][0] - cx
        } else {
            points[r][1] - cy
        }
    });
    let svd = centred.svd(false, true);
    let v_t = svd.v_t.as_ref()?;
    let (dominant, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .fold((0usize, f64::NEG_INFINITY), |best, (i, &s)| {
            if s > best.1 {
                (i, s)
            } else {
                best
            }
        });
    let dx = v_t[(dominant, 0)];
    let dy = v_t[(dominant, 1)];

    let norm = dx.hypot(dy).max(1e-12);
    let a = -dy / norm;
    let b = dx / norm;
    let model = LineModel {
        a,
        b,
        c: -(a * cx + b * cy),
    };
    let mse = points
        .iter()
        .map(|&p| {
            let d = model.signed_distance(p);
            d * d
        })
        .sum::<f64>()
        / n;
    Some((model, mse.sqrt()))
}
