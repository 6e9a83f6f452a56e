//! End-to-end calibration of one image.
use super::measure::{measure_axis, AxisMeasurement};
use super::params::CalibConfig;
use super::render::{apply_draw_ops, DrawOp};
use crate::diagnostics::{DiagnosticLog, TimingBreakdown};
use crate::edges::{build_edge_map_gray, locate_dense_window, EdgeMap};
use crate::error::CalibError;
use crate::image::gray::rgb_to_gray;
use crate::image::io::{output_path, save_rgb_png};
use crate::image::{normalize_orientation, GrayImageU8};
use crate::lines::{fit_roi_lines, RoiLines};
use crate::ticks::{detect_ticks, repair_spacing, RulerOrientation, SpacingStats, TickSet};
use crate::types::Rect;
use image::{DynamicImage, RgbImage};
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Tick analysis and derived scale of one ruler.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScale {
    /// Crop the ticks were detected in.
    pub region: Rect,
    /// Detected ticks in image coordinates.
    pub detected: TickSet,
    /// Ticks after repair (the detected ones when a small gap was found).
    pub ticks: TickSet,
    pub spacing: SpacingStats,
    pub pixels_per_mm: f64,
    /// True when fewer than two ticks forced the nominal scale.
    pub nominal_fallback: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationResult {
    pub image_width: u32,
    pub image_height: u32,
    pub exif_orientation: u32,
    pub rotated_to_landscape: bool,
    pub dense_window: Rect,
    pub dense_window_fallback: bool,
    pub horizontal_box: Rect,
    pub vertical_box: Rect,
    pub horizontal: AxisScale,
    pub vertical: AxisScale,
    pub roi1: RoiLines,
    pub roi2: RoiLines,
    pub measurements: Vec<AxisMeasurement>,
    pub logs: DiagnosticLog,
    pub timings: TimingBreakdown,
}

/// Paths written by [`CalibrationOutput::write_outputs`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub edge: PathBuf,
    pub overlay: PathBuf,
}

/// Rendered rasters and the structured result of one run.
#[derive(Clone, Debug)]
pub struct CalibrationOutput {
    /// Edge map (white on black) with annotations.
    pub edge_raster: RgbImage,
    /// Orientation-normalized input with annotations.
    pub overlay_raster: RgbImage,
    pub result: CalibrationResult,
}

impl CalibrationOutput {
    /// Save `<stem>_edge.png` and `<stem>_overlay.png` into `dir`.
    pub fn write_outputs(&self, dir: &Path, stem: &str) -> Result<OutputPaths, CalibError> {
        let edge = output_path(dir, stem, "edge");
        let overlay = output_path(dir, stem, "overlay");
        save_rgb_png(&self.edge_raster, &edge)?;
        save_rgb_png(&self.overlay_raster, &overlay)?;
        debug!("wrote {} and {}", edge.display(), overlay.display());
        Ok(OutputPaths { edge, overlay })
    }
}

fn measure_ruler(
    gray: &GrayImageU8,
    region: Rect,
    orientation: RulerOrientation,
    config: &CalibConfig,
    log: &mut DiagnosticLog,
) -> AxisScale {
    let origin = match orientation {
        RulerOrientation::Horizontal => region.x,
        RulerOrientation::Vertical => region.y,
    };
    let detected = gray
        .as_view()
        .crop(region)
        .map(|crop| detect_ticks(crop, orientation, &config.ticks).offset(origin))
        .unwrap_or_default();
    let (ticks, spacing) = repair_spacing(&detected, &config.repair);
    let name = axis_name(orientation);
    log.append(spacing.log.clone());
    if spacing.small_gap_error {
        log.error(format!(
            "{name} ruler: abnormally small tick gap, ticks kept as detected"
        ));
    }
    let (pixels_per_mm, nominal_fallback) = match ticks.mean_spacing() {
        Some(s) => (s, false),
        None => (config.physical.pixels_per_mm, true),
    };
    if nominal_fallback {
        log.warn(format!(
            "{name} ruler: {} ticks, using nominal {:.3} px/mm",
            ticks.len(),
            pixels_per_mm
        ));
    } else {
        log.info(format!(
            "{name} ruler: {} ticks, {:.3} px/mm",
            ticks.len(),
            pixels_per_mm
        ));
    }
    AxisScale {
        region,
        detected,
        ticks,
        spacing,
        pixels_per_mm,
        nominal_fallback,
    }
}

fn axis_name(orientation: RulerOrientation) -> &'static str {
    match orientation {
        RulerOrientation::Horizontal => "horizontal",
        RulerOrientation::Vertical => "vertical",
    }
}

/// Calibration boxes anchored at the dense window.
///
/// Returns the drawn horizontal and vertical boxes and the two tick
/// regions: the top half of the horizontal box and the left half of the
/// vertical box, each clamped to the image.
pub fn calibration_boxes(
    window: Rect,
    width_px: i32,
    height_px: i32,
    w: i32,
    h: i32,
) -> (Rect, Rect, Rect, Rect) {
    let (x_start, y_start) = (window.x, window.y);
    let (x_end, y_end) = (window.right(), window.bottom());
    let h_right = (x_end + width_px).min(w - 1);
    let v_bottom = (y_end + height_px).min(h - 1);
    let horizontal_box = Rect::from_corners(x_start, y_start, h_right, y_end);
    let vertical_box = Rect::from_corners(x_start, y_end, x_end, v_bottom);

    let y_half = y_start + ((y_end - y_start) / 2).max(2);
    let h_region = Rect::new(
        x_start,
        y_start,
        (h_right - x_start).max(2),
        (y_half - y_start).max(2),
    )
    .clamp_to(w, h);
    let x_half = x_start + ((x_end - x_start) / 2).max(2);
    let v_region = Rect::new(
        x_start,
        y_end,
        (x_half - x_start).max(2),
        (v_bottom - y_end).max(2),
    )
    .clamp_to(w, h);
    (horizontal_box, vertical_box, h_region, v_region)
}

/// First and second measurement ROIs from the calibrated scales.
pub fn measurement_rois(
    window: Rect,
    pxmm_h: f64,
    pxmm_v: f64,
    config: &CalibConfig,
    w: i32,
    h: i32,
) -> (Rect, Rect) {
    let p = &config.physical;
    let offset_y = p.roi_offset_y_base_px + (p.roi_offset_y_mm * pxmm_v).round() as i32;
    let roi1 = Rect::new(
        (window.right() + p.roi_offset_x_px).min(w - 2),
        (window.bottom() + offset_y).min(h - 2),
        ((p.roi_width_mm * pxmm_h).round() as i32).max(2),
        ((p.roi_height_mm * pxmm_v).round() as i32).max(2),
    )
    .clamp_to(w, h);
    let shift = (p.shift_distance_mm * pxmm_h).round() as i32;
    let roi2 = roi1.translate(shift, 0).clamp_to(w, h);
    (roi1, roi2)
}

/// Run the full pipeline on a decoded image.
///
/// `exif_orientation` is the EXIF orientation code of the source (1 when
/// unknown). Only invalid input is an error; every degraded measurement is
/// reported in `result.logs` and the rasters are always produced.
pub fn run_calibration(
    image: &DynamicImage,
    exif_orientation: u32,
    config: &CalibConfig,
) -> Result<CalibrationOutput, CalibError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CalibError::InvalidInput(format!(
            "image has zero size ({}x{})",
            image.width(),
            image.height()
        )));
    }
    config.validate()?;
    let total = Instant::now();
    let mut timings = TimingBreakdown::default();
    let mut log = DiagnosticLog::new();

    let normalized = timings.time("normalize", || {
        normalize_orientation(image.clone(), exif_orientation)
    });
    let rgb = normalized.image;
    let (w, h) = (rgb.width() as i32, rgb.height() as i32);
    log.info(format!(
        "loaded {w}x{h} (exif orientation {exif_orientation}, landscape enforced)"
    ));

    let gray = rgb_to_gray(&rgb);
    let edges: EdgeMap = timings.time("edges", || build_edge_map_gray(gray.as_view(), &config.edges))?;
    let (window, fallback) = timings.time("dense_window", || {
        locate_dense_window(&edges, config.edges.window_h, config.edges.window_w)
    });
    if fallback {
        log.info(format!(
            "dense window fallback: x=[{}, {}) y=[{}, {})",
            window.x,
            window.right(),
            window.y,
            window.bottom()
        ));
    }

    let nominal = config.physical.pixels_per_mm;
    let width_px = (config.physical.target_mm.0 * nominal).ceil() as i32;
    let height_px = (config.physical.target_mm.1 * nominal).ceil() as i32;
    let (horizontal_box, vertical_box, h_region, v_region) =
        calibration_boxes(window, width_px, height_px, w, h);

    let style = &config.style;
    let mut ops = vec![
        DrawOp::outline(horizontal_box, style.horizontal_box, style.box_thickness),
        DrawOp::outline(vertical_box, style.vertical_box, style.box_thickness),
    ];

    let horizontal = timings.time("ticks_horizontal", || {
        measure_ruler(&gray, h_region, RulerOrientation::Horizontal, config, &mut log)
    });
    for &cx in horizontal.ticks.iter() {
        ops.push(DrawOp::Line {
            p1: [cx as f64, h_region.y as f64],
            p2: [cx as f64, h_region.bottom() as f64],
            color: style.tick,
            thickness: style.tick_thickness,
        });
    }
    let vertical = timings.time("ticks_vertical", || {
        measure_ruler(&gray, v_region, RulerOrientation::Vertical, config, &mut log)
    });
    for &cy in vertical.ticks.iter() {
        ops.push(DrawOp::Line {
            p1: [v_region.x as f64, cy as f64],
            p2: [v_region.right() as f64, cy as f64],
            color: style.tick,
            thickness: style.tick_thickness,
        });
    }

    let (roi1_rect, roi2_rect) = measurement_rois(
        window,
        horizontal.pixels_per_mm,
        vertical.pixels_per_mm,
        config,
        w,
        h,
    );
    let mut rng = config.ransac.rng();
    ops.push(DrawOp::outline(roi1_rect, style.tick, style.roi_thickness));
    let roi1 = timings.time("lines_roi1", || {
        fit_roi_lines(&edges, roi1_rect, "ROI1", &config.ransac, &mut rng)
    });
    log.append(roi1.log.clone());
    ops.push(DrawOp::outline(roi2_rect, style.tick, style.roi_thickness));
    let roi2 = timings.time("lines_roi2", || {
        fit_roi_lines(&edges, roi2_rect, "ROI2", &config.ransac, &mut rng)
    });
    log.append(roi2.log.clone());

    for roi in [&roi1, &roi2] {
        for (fit, color) in [
            (&roi.horizontal, style.horizontal_line),
            (&roi.vertical, style.vertical_line),
        ] {
            if let Some(fit) = fit {
                ops.push(DrawOp::Line {
                    p1: fit.endpoints[0],
                    p2: fit.endpoints[1],
                    color,
                    thickness: style.line_thickness,
                });
            }
        }
    }
    for p in [roi1.intersection, roi2.intersection].into_iter().flatten() {
        ops.push(DrawOp::FilledCircle {
            center: p,
            radius: style.intersection_radius,
            color: style.intersection,
        });
    }

    let mut measurements = Vec::new();
    match (roi1.intersection, roi2.intersection) {
        (Some(p1), Some(p2)) => {
            let axes = [
                (p1[0], p2[0], &horizontal, "horizontal ruler"),
                (p1[1], p2[1], &vertical, "vertical ruler"),
            ];
            for (c1, c2, scale, name) in axes {
                let Some(m) = measure_axis(
                    c1.round() as i32,
                    c2.round() as i32,
                    &scale.ticks,
                    scale.pixels_per_mm,
                    name,
                ) else {
                    log.warn(format!("[{name}] no ticks, distance not computed"));
                    continue;
                };
                log.info(format!(
                    "[{name}] indexDiff={}, offset1={:.2}mm, offset2={:.2}mm",
                    m.index_diff, m.offset1_mm, m.offset2_mm
                ));
                measurements.push(m);
            }
        }
        _ => log.error("intersection missing in at least one ROI, distances not computed"),
    }

    let (edge_raster, overlay_raster) = timings.time("render", || {
        let mut edge_raster = edges.to_rgb();
        apply_draw_ops(&mut edge_raster, &ops);
        let mut overlay_raster = rgb;
        apply_draw_ops(&mut overlay_raster, &ops);
        (edge_raster, overlay_raster)
    });
    timings.total_ms = total.elapsed().as_secs_f64() * 1000.0;

    Ok(CalibrationOutput {
        edge_raster,
        overlay_raster,
        result: CalibrationResult {
            image_width: w as u32,
            image_height: h as u32,
            exif_orientation,
            rotated_to_landscape: normalized.rotated_to_landscape,
            dense_window: window,
            dense_window_fallback: fallback,
            horizontal_box,
            vertical_box,
            horizontal,
            vertical,
            roi1,
            roi2,
            measurements,
            logs: log,
            timings,
        },
    })
}
