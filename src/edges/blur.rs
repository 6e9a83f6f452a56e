//! Separable Gaussian smoothing ahead of Canny.
//!
//! Small odd kernels (≤ 7 taps) use fixed binomial weights; larger ones are
//! sampled from a Gaussian with `sigma = 0.3·((k−1)·0.5 − 1) + 0.8`. Borders
//! replicate the outermost pixel. The output is rounded back onto the 8-bit
//! grid so the gradient stage sees integer intensities.
use crate::error::CalibError;
use crate::image::{ImageF32, ImageU8, ImageView, ImageViewMut};

/// 1D taps applied along rows and then along columns.
pub trait SeparableFilter {
    /// Taps in left-to-right order, odd length, summing to one.
    fn taps(&self) -> &[f32];
}

/// Normalised Gaussian taps for a square kernel of odd size.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

const BINOMIAL_1: [f32; 1] = [1.0];
const BINOMIAL_3: [f32; 3] = [0.25, 0.5, 0.25];
const BINOMIAL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];
const BINOMIAL_7: [f32; 7] = [
    1.0 / 64.0,
    6.0 / 64.0,
    15.0 / 64.0,
    20.0 / 64.0,
    15.0 / 64.0,
    6.0 / 64.0,
    1.0 / 64.0,
];

impl GaussianKernel {
    /// Kernel for an odd `ksize ≥ 1`.
    pub fn new(ksize: usize) -> Result<Self, CalibError> {
        if ksize == 0 || ksize % 2 == 0 {
            return Err(CalibError::InvalidInput(format!(
                "blur kernel size must be odd and positive, got {ksize}"
            )));
        }
        let taps = match ksize {
            1 => BINOMIAL_1.to_vec(),
            3 => BINOMIAL_3.to_vec(),
            5 => BINOMIAL_5.to_vec(),
            7 => BINOMIAL_7.to_vec(),
            _ => sampled_gaussian(ksize),
        };
        Ok(Self { taps })
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

fn sampled_gaussian(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (ksize / 2) as f64;
    let scale = -0.5 / (sigma * sigma);
    let raw: Vec<f64> = (0..ksize)
        .map(|i| {
            let d = i as f64 - half;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|v| (v / sum) as f32).collect()
}

/// Convolve rows then columns with `filter`, replicating border pixels.
pub fn apply_separable(inp: &ImageF32, filter: &dyn SeparableFilter) -> ImageF32 {
    let w = inp.w;
    let h = inp.h;
    let taps = filter.taps();
    let half = taps.len() / 2;
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        let src = inp.row(y);
        let dst = tmp.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &t) in taps.iter().enumerate() {
                let xx = (x + k).saturating_sub(half).min(w - 1);
                acc += src[xx] * t;
            }
            *d = acc;
        }
    }
    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &t) in taps.iter().enumerate() {
            let yy = (y + k).saturating_sub(half).min(h - 1);
            let src = tmp.row(yy);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d += s * t;
            }
        }
    }
    out
}

/// Gaussian blur of an 8-bit view with an odd square kernel.
pub fn gaussian_blur(gray: ImageU8<'_>, ksize: usize) -> Result<ImageF32, CalibError> {
    let kernel = GaussianKernel::new(ksize)?;
    let mut out = apply_separable(&ImageF32::from_u8(gray), &kernel);
    for v in out.data.iter_mut() {
        *v = v.round().clamp(0.0, 255.0);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_or_zero_kernel_is_rejected() {
        assert!(matches!(
            GaussianKernel::new(4),
            Err(CalibError::InvalidInput(_))
        ));
        assert!(GaussianKernel::new(0).is_err());
        assert_eq!(GaussianKernel::new(9).map(|k| k.len()).ok(), Some(9));
    }

    #[test]
    fn sampled_kernel_is_normalised_and_symmetric() {
        let k = GaussianKernel::new(11).expect("odd kernel");
        let taps = k.taps();
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-7);
        }
    }

    #[test]
    fn blur_keeps_constant_image_and_spreads_step() {
        let w = 8;
        let h = 4;
        let flat = vec![100u8; w * h];
        let view = ImageU8 {
            w,
            h,
            stride: w,
            data: &flat,
        };
        let out = gaussian_blur(view, 3).expect("blur");
        assert!(out.data.iter().all(|&v| v == 100.0));

        let mut step = vec![0u8; w * h];
        for y in 0..h {
            for x in 4..w {
                step[y * w + x] = 200;
            }
        }
        let view = ImageU8 {
            w,
            h,
            stride: w,
            data: &step,
        };
        let out = gaussian_blur(view, 3).expect("blur");
        assert_eq!(out.get(3, 1), 50.0);
        assert_eq!(out.get(4, 1), 150.0);
        assert_eq!(out.get(0, 1), 0.0);
    }
}
