//! File-level entry points: one image, or many independent images.
use super::params::CalibConfig;
use super::pipeline::{run_calibration, CalibrationResult, OutputPaths};
use crate::error::CalibError;
use crate::image::io::{file_stem_or_default, load_image_with_orientation};
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of [`run_calibration_file`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationFiles {
    pub input: PathBuf,
    pub outputs: OutputPaths,
    pub result: CalibrationResult,
}

/// Decode `input`, honour its EXIF orientation, run the pipeline and write
/// `<stem>_edge.png` / `<stem>_overlay.png` into `out_dir`.
pub fn run_calibration_file(
    input: &Path,
    out_dir: &Path,
    config: &CalibConfig,
) -> Result<CalibrationFiles, CalibError> {
    let (image, orientation) = load_image_with_orientation(input)?;
    debug!(
        "{}: {}x{}, exif orientation {orientation}",
        input.display(),
        image.width(),
        image.height()
    );
    let output = run_calibration(&image, orientation, config)?;
    let outputs = output.write_outputs(out_dir, &file_stem_or_default(input))?;
    Ok(CalibrationFiles {
        input: input.to_path_buf(),
        outputs,
        result: output.result,
    })
}

/// Run [`run_calibration_file`] over several inputs. Results keep the input
/// order; one failing file does not stop the others.
pub fn run_batch(
    inputs: &[PathBuf],
    out_dir: &Path,
    config: &CalibConfig,
) -> Vec<Result<CalibrationFiles, CalibError>> {
    let run_one = |input: &PathBuf| {
        let res = run_calibration_file(input, out_dir, config);
        if let Err(err) = &res {
            warn!("{}: {err}", input.display());
        }
        res
    };
    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().map(run_one).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(run_one).collect()
    }
}
