#![doc = include_str!("../README.md")]

// Pipeline stages
pub mod calib;
pub mod edges;
pub mod lines;
pub mod ticks;

// Supporting modules
pub mod angle;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::calib::{
    run_batch, run_calibration, run_calibration_file, CalibConfig, CalibrationOutput,
    CalibrationResult,
};
pub use crate::error::CalibError;
pub use crate::types::Rect;

// --- Prelude ---------------------------------------------------------------

/// Common imports for running a calibration.
pub mod prelude {
    pub use crate::calib::{
        run_calibration, run_calibration_file, AxisMeasurement, CalibConfig, CalibrationOutput,
        CalibrationResult,
    };
    pub use crate::diagnostics::{DiagnosticLog, Severity};
    pub use crate::error::CalibError;
    pub use crate::image::ImageU8;
    pub use crate::types::Rect;
}
