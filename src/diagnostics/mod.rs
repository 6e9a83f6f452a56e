//! Diagnostics returned alongside calibration results: the ordered log and
//! per-stage timings.

pub mod journal;
pub mod timing;

pub use journal::{DiagnosticLine, DiagnosticLog, Severity};
pub use timing::{StageTiming, TimingBreakdown};
