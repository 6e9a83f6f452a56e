//! Parameters of a calibration run.
//!
//! All tunables flow through one immutable [`CalibConfig`]. Every section
//! deserializes with defaults, so a JSON config only names what it changes.
use crate::edges::EdgeParams;
use crate::error::CalibError;
use crate::lines::RansacParams;
use crate::ticks::{RepairParams, TickParams};
use serde::{Deserialize, Serialize};

/// Physical layout of the calibration target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalParams {
    /// Nominal scale used to size the calibration boxes and as the fallback
    /// when a ruler yields fewer than two ticks.
    pub pixels_per_mm: f64,
    /// Target width and height in millimetres.
    pub target_mm: (f64, f64),
    pub roi_offset_x_px: i32,
    pub roi_offset_y_base_px: i32,
    /// Vertical ROI offset below the dense window, converted with the
    /// vertical scale.
    pub roi_offset_y_mm: f64,
    pub roi_width_mm: f64,
    pub roi_height_mm: f64,
    /// Horizontal distance from the first to the second ROI.
    pub shift_distance_mm: f64,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            pixels_per_mm: 16.0,
            target_mm: (323.0, 75.0),
            roi_offset_x_px: 5,
            roi_offset_y_base_px: 5,
            roi_offset_y_mm: 45.0,
            roi_width_mm: 8.0,
            roi_height_mm: 30.0,
            shift_distance_mm: 312.0,
        }
    }
}

/// Colors (RGB) and stroke sizes of the rendered annotations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawStyle {
    pub horizontal_box: [u8; 3],
    pub vertical_box: [u8; 3],
    /// Tick marks and ROI outlines.
    pub tick: [u8; 3],
    pub intersection: [u8; 3],
    pub horizontal_line: [u8; 3],
    pub vertical_line: [u8; 3],
    pub tick_thickness: u32,
    pub box_thickness: u32,
    pub roi_thickness: u32,
    pub line_thickness: u32,
    pub intersection_radius: i32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            horizontal_box: [255, 0, 0],
            vertical_box: [0, 255, 0],
            tick: [255, 255, 0],
            intersection: [128, 255, 0],
            horizontal_line: [0, 255, 255],
            vertical_line: [255, 0, 255],
            tick_thickness: 1,
            box_thickness: 1,
            roi_thickness: 2,
            line_thickness: 1,
            intersection_radius: 2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibConfig {
    pub edges: EdgeParams,
    pub ticks: TickParams,
    pub repair: RepairParams,
    pub ransac: RansacParams,
    pub physical: PhysicalParams,
    pub style: DrawStyle,
}

impl CalibConfig {
    /// Reject numeric settings that make a run meaningless.
    pub fn validate(&self) -> Result<(), CalibError> {
        let p = &self.physical;
        let positive = [
            ("pixels_per_mm", p.pixels_per_mm),
            ("target width", p.target_mm.0),
            ("target height", p.target_mm.1),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(CalibError::InvalidInput(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        let finite = [
            ("roi_offset_y_mm", p.roi_offset_y_mm),
            ("roi_width_mm", p.roi_width_mm),
            ("roi_height_mm", p.roi_height_mm),
            ("shift_distance_mm", p.shift_distance_mm),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(CalibError::InvalidInput(format!("{name} is not finite")));
            }
        }
        if self.edges.blur_ksize == 0 || self.edges.blur_ksize % 2 == 0 {
            return Err(CalibError::InvalidInput(format!(
                "blur kernel size must be odd and positive, got {}",
                self.edges.blur_ksize
            )));
        }
        Ok(())
    }
}
