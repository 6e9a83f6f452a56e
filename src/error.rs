//! Error type for the calibration pipeline.
//!
//! Only conditions that make the whole call meaningless are errors. Degraded
//! measurements (too few edge pixels, spacing anomalies, parallel lines,
//! degenerate rectangles) are reported as diagnostic lines instead.

/// Failure of a calibration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalibError {
    /// Zero-size or undecodable image, or an unusable numeric parameter.
    InvalidInput(String),
    /// File-system or encoder failure while reading inputs or writing rasters.
    Io(String),
    /// Unreadable or malformed runtime configuration.
    Config(String),
}

impl std::fmt::Display for CalibError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Io(msg) => write!(f, "i/o failure: {msg}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CalibError {}

impl From<std::io::Error> for CalibError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<image::ImageError> for CalibError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::Io(e.to_string()),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
