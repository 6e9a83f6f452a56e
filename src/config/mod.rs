//! JSON runtime configuration of the `film_calib` tool.
//!
//! ```json
//! {
//!   "inputs": ["shots/IMG_0001.jpg", "shots/IMG_0002.jpg"],
//!   "output_dir": "out",
//!   "json_report": "out/report.json",
//!   "calib": { "physical": { "pixels_per_mm": 16.0 } }
//! }
//! ```
//!
//! `input` (single path) and `inputs` may be combined; `calib` and every
//! section inside it fall back to defaults.
use crate::calib::CalibConfig;
use crate::error::CalibError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Pretty JSON with every calibration result, written when set.
    #[serde(default)]
    pub json_report: Option<PathBuf>,
    #[serde(default)]
    pub calib: CalibConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl RuntimeConfig {
    /// Configuration for a single image with default parameters.
    pub fn for_image(input: PathBuf, output_dir: Option<PathBuf>) -> Self {
        Self {
            input: Some(input),
            inputs: Vec::new(),
            output_dir: output_dir.unwrap_or_else(default_output_dir),
            json_report: None,
            calib: CalibConfig::default(),
        }
    }

    /// `input` followed by `inputs`.
    pub fn all_inputs(&self) -> Vec<PathBuf> {
        self.input
            .iter()
            .chain(self.inputs.iter())
            .cloned()
            .collect()
    }
}

pub fn parse_config(json: &str) -> Result<RuntimeConfig, CalibError> {
    let config: RuntimeConfig =
        serde_json::from_str(json).map_err(|e| CalibError::Config(e.to_string()))?;
    if config.input.is_none() && config.inputs.is_empty() {
        return Err(CalibError::Config(
            "no input image given (`input` or `inputs`)".to_string(),
        ));
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, CalibError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalibError::Config(format!("failed to read {}: {e}", path.display())))?;
    parse_config(&contents).map_err(|e| match e {
        CalibError::Config(msg) => CalibError::Config(format!("{}: {msg}", path.display())),
        other => other,
    })
}
