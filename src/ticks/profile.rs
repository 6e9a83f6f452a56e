//! 1D darkness profiles and their Gaussian smoothing.
use super::RulerOrientation;
use crate::image::{ImageU8, ImageView};

/// Sum of `255 − I` across the ruler: one value per column for a horizontal
/// ruler, one per row for a vertical ruler.
pub fn darkness_profile(gray: ImageU8<'_>, orientation: RulerOrientation) -> Vec<f64> {
    match orientation {
        RulerOrientation::Horizontal => {
            let mut out = vec![0.0f64; gray.w];
            for row in gray.rows() {
                for (acc, &v) in out.iter_mut().zip(row) {
                    *acc += (255 - v) as f64;
                }
            }
            out
        }
        RulerOrientation::Vertical => gray
            .rows()
            .map(|row| row.iter().map(|&v| (255 - v) as f64).sum())
            .collect(),
    }
}

/// Normalised Gaussian taps over `[-radius, radius]`.
pub fn gaussian_kernel_1d(sigma: f64, radius: usize) -> Vec<f64> {
    let r = radius as i64;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-(x * x) / denom).exp()
        })
        .collect();
    let sum = raw.iter().sum::<f64>().max(1e-12);
    raw.into_iter().map(|v| v / sum).collect()
}

/// "Same"-size convolution; taps falling outside the signal are dropped and
/// the remaining weights renormalised.
pub fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = signal.len() as i64;
    let r = (kernel.len() / 2) as i64;
    (0..n)
        .map(|i| {
            let mut s = 0.0;
            let mut w = 0.0;
            for (j, &k) in kernel.iter().enumerate() {
                let idx = i + j as i64 - r;
                if (0..n).contains(&idx) {
                    s += signal[idx as usize] * k;
                    w += k;
                }
            }
            if w > 0.0 {
                s / w
            } else {
                signal[i as usize]
            }
        })
        .collect()
}

/// Linear rescale onto `0..=255` (range floored at 1e−6), rounded.
pub fn rescale_to_u8(signal: &[f64]) -> Vec<u8> {
    let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = (max - min).max(1e-6);
    signal
        .iter()
        .map(|&v| (255.0 * (v - min) / range).round().clamp(0.0, 255.0) as u8)
        .collect()
}
