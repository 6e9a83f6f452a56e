//! Edge stage: gray conversion, Gaussian blur, Canny and the dense-window
//! locator.
//!
//! - Gradient computation (3×3 Sobel) with an L1 or L2 magnitude.
//! - Canny non-maximum suppression followed by 8-connected hysteresis,
//!   producing a binary [`EdgeMap`].
//! - A sliding-window scan over per-row and per-column edge counts that
//!   anchors the calibration boxes.
//!
//! Borders are handled by clamping indices (replicate). Gradients keep the
//! 8-bit intensity scale, so thresholds read like the classic Canny ones.

pub mod blur;
pub mod canny;
pub mod dense;
pub mod grad;
pub mod map;

pub use blur::{gaussian_blur, GaussianKernel, SeparableFilter};
pub use canny::canny;
pub use dense::locate_dense_window;
pub use grad::{sobel_gradients, Grad, GradientNorm};
pub use map::EdgeMap;

use crate::error::CalibError;
use crate::image::{to_gray, ImageU8};
use image::DynamicImage;
use log::debug;
use serde::{Deserialize, Serialize};

/// Threshold scale applied when the L2 magnitude is used.
pub const L2_THRESHOLD_SCALE: f32 = 0.7;

/// Parameters of the edge stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Odd square blur kernel size.
    pub blur_ksize: usize,
    pub canny_low: f32,
    pub canny_high: f32,
    /// `sqrt(gx²+gy²)` instead of `|gx|+|gy|`; also scales both thresholds
    /// by [`L2_THRESHOLD_SCALE`].
    pub use_l2: bool,
    /// Dense window height in pixels.
    pub window_h: usize,
    /// Dense window width in pixels.
    pub window_w: usize,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_ksize: 3,
            canny_low: 30.0,
            canny_high: 90.0,
            use_l2: true,
            window_h: 80,
            window_w: 80,
        }
    }
}

impl EdgeParams {
    /// Canny thresholds after the L2 scale.
    pub fn effective_thresholds(&self) -> (f32, f32) {
        let scale = if self.use_l2 { L2_THRESHOLD_SCALE } else { 1.0 };
        (self.canny_low * scale, self.canny_high * scale)
    }
}

/// Edge map of a decoded image of any color layout.
pub fn build_edge_map(image: &DynamicImage, params: &EdgeParams) -> Result<EdgeMap, CalibError> {
    let gray = to_gray(image);
    build_edge_map_gray(gray.as_view(), params)
}

/// Edge map of an 8-bit grayscale view.
pub fn build_edge_map_gray(gray: ImageU8<'_>, params: &EdgeParams) -> Result<EdgeMap, CalibError> {
    if gray.w == 0 || gray.h == 0 {
        return Err(CalibError::InvalidInput(format!(
            "cannot build an edge map of a {}x{} image",
            gray.w, gray.h
        )));
    }
    let blurred = gaussian_blur(gray, params.blur_ksize)?;
    let norm = if params.use_l2 {
        GradientNorm::L2
    } else {
        GradientNorm::L1
    };
    let grad = sobel_gradients(&blurred, norm);
    let (low, high) = params.effective_thresholds();
    let map = canny(&grad, low, high);
    debug!(
        "edge map {}x{}: {} edge pixels (low={low:.1}, high={high:.1})",
        map.w,
        map.h,
        map.count()
    );
    Ok(map)
}
