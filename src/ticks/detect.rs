//! Tick centre detection on a single ruler crop.
use super::otsu::otsu_mask;
use super::peaks::{
    estimate_step, keep_darker_within, local_maxima, refine_centre_of_mass, suppress_1d,
};
use super::profile::{convolve_same, darkness_profile, gaussian_kernel_1d, rescale_to_u8};
use super::{RulerOrientation, TickSet};
use crate::image::ImageU8;
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters of the tick detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickParams {
    /// Sigma of the profile smoothing kernel.
    pub smooth_sigma: f64,
    /// Half-width of the profile smoothing kernel.
    pub smooth_radius: usize,
    /// Smallest tick spacing considered by the step estimate.
    pub min_spacing: usize,
    /// Largest tick spacing considered by the step estimate.
    pub max_spacing: usize,
    /// Suppression separation as a fraction of the estimated step.
    pub nms_sep_factor: f64,
    /// Step assumed when fewer than three candidates exist.
    pub default_step: usize,
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            smooth_sigma: 1.2,
            smooth_radius: 4,
            min_spacing: 2,
            max_spacing: 40,
            nms_sep_factor: 0.8,
            default_step: 5,
        }
    }
}

/// Detect tick centres in `gray`, in coordinates local to the crop.
///
/// Empty or uniform crops yield an empty set.
pub fn detect_ticks(
    gray: ImageU8<'_>,
    orientation: RulerOrientation,
    params: &TickParams,
) -> TickSet {
    let raw = darkness_profile(gray, orientation);
    if raw.is_empty() || gray.w == 0 || gray.h == 0 {
        return TickSet::default();
    }
    let kernel = gaussian_kernel_1d(params.smooth_sigma, params.smooth_radius);
    let smooth = convolve_same(&raw, &kernel);
    let mask = otsu_mask(&rescale_to_u8(&smooth));

    let candidates = local_maxima(&smooth, &mask);
    let amplitudes: Vec<f64> = candidates.iter().map(|&i| smooth[i]).collect();
    let step = estimate_step(
        &candidates,
        params.min_spacing,
        params.max_spacing,
        params.default_step,
    );
    let min_sep = ((params.nms_sep_factor * step as f64).round() as usize).max(2);
    let peaks = suppress_1d(&candidates, &amplitudes, min_sep);
    let centres = refine_centre_of_mass(&raw, &peaks, (step / 2).max(1));
    let kept = keep_darker_within(&centres, &raw, min_sep);

    debug!(
        "{orientation:?} ruler: {} candidates, step {step}, {} ticks",
        candidates.len(),
        kept.len()
    );
    TickSet::from_positions(kept.into_iter().map(|x| x as i32).collect())
}
