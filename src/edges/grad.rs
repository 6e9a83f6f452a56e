//! 3×3 Sobel gradients with a selectable magnitude norm.
//!
//! - Border pixels replicate their nearest neighbour (clamped indices).
//! - Outputs per-pixel `gx`, `gy` and `mag`, where `mag` is either
//!   `sqrt(gx²+gy²)` (L2) or `|gx|+|gy|` (L1).
//!
//! Complexity: O(W·H); memory: three float buffers.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Norm used to combine `gx` and `gy` into a magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientNorm {
    L1,
    L2,
}

impl GradientNorm {
    #[inline]
    fn combine(self, gx: f32, gy: f32) -> f32 {
        match self {
            GradientNorm::L2 => gx.hypot(gy),
            GradientNorm::L1 => gx.abs() + gy.abs(),
        }
    }
}

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    pub gx: ImageF32,
    pub gy: ImageF32,
    /// Magnitude under the chosen [`GradientNorm`].
    pub mag: ImageF32,
}

/// Sobel derivatives of `l`; borders replicate the nearest pixel.
pub fn sobel_gradients(l: &ImageF32, norm: GradientNorm) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let top = l.row(y.saturating_sub(1));
        let mid = l.row(y);
        let bot = l.row((y + 1).min(h - 1));
        let (out_gx, out_gy, out_mag) = (gx.row_mut(y), gy.row_mut(y), mag.row_mut(y));
        for x in 0..w {
            let (xl, xr) = (x.saturating_sub(1), (x + 1).min(w - 1));
            // [1 2 1] smoothing across the derivative direction
            let dx = (top[xr] - top[xl]) + 2.0 * (mid[xr] - mid[xl]) + (bot[xr] - bot[xl]);
            let dy = (bot[xl] + 2.0 * bot[x] + bot[xr]) - (top[xl] + 2.0 * top[x] + top[xr]);
            out_gx[x] = dx;
            out_gy[x] = dy;
            out_mag[x] = norm.combine(dx, dy);
        }
    }

    Grad { gx, gy, mag }
}
