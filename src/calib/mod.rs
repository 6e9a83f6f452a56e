//! Calibration orchestration: from a decoded image to scales, reference
//! lines, millimetre offsets and annotated rasters.

pub mod batch;
pub mod measure;
pub mod params;
pub mod pipeline;
pub mod render;

pub use batch::{run_batch, run_calibration_file, CalibrationFiles};
pub use measure::{measure_axis, AxisMeasurement};
pub use params::{CalibConfig, DrawStyle, PhysicalParams};
pub use pipeline::{
    run_calibration, AxisScale, CalibrationOutput, CalibrationResult, OutputPaths,
};
pub use render::{apply_draw_ops, DrawOp};
