mod common;

use common::init_logging;
use common::synthetic_image::{calibration_target, TargetLayout};
use film_calib::prelude::*;
use image::{imageops, DynamicImage};

fn target_config() -> CalibConfig {
    let mut cfg = CalibConfig::default();
    cfg.edges.window_h = 40;
    cfg.edges.window_w = 40;
    cfg.physical.pixels_per_mm = 20.0;
    cfg.physical.target_mm = (25.0, 15.0);
    cfg.physical.roi_offset_y_mm = 2.0;
    cfg.physical.roi_width_mm = 4.0;
    cfg.physical.roi_height_mm = 4.0;
    cfg.physical.shift_distance_mm = 20.0;
    cfg.ransac.seed = Some(42);
    cfg
}

fn assert_near(p: Option<[f64; 2]>, expected: (i32, i32), tol: f64) {
    let p = p.expect("intersection");
    let (ex, ey) = (expected.0 as f64, expected.1 as f64);
    assert!(
        (p[0] - ex).abs() < tol && (p[1] - ey).abs() < tol,
        "intersection {p:?} vs expected {expected:?}"
    );
}

#[test]
fn synthetic_target_end_to_end() {
    init_logging();
    let layout = TargetLayout::default();
    let img = DynamicImage::ImageLuma8(calibration_target(&layout));
    let out = run_calibration(&img, 1, &target_config()).expect("calibration");
    let r = &out.result;

    assert!(!r.rotated_to_landscape);
    assert!(!r.dense_window_fallback);
    assert!((r.dense_window.x - 40).abs() <= 2, "window {:?}", r.dense_window);
    assert!((r.dense_window.y - 40).abs() <= 2, "window {:?}", r.dense_window);

    assert!(!r.horizontal.nominal_fallback);
    assert!(!r.vertical.nominal_fallback);
    assert!((r.horizontal.pixels_per_mm - 20.0).abs() < 0.5);
    assert!((r.vertical.pixels_per_mm - 20.0).abs() < 0.5);
    assert!(r.horizontal.ticks.len() >= 20);
    assert!(r.vertical.ticks.len() >= 10);
    assert_eq!(r.horizontal.spacing.inserted_total, 0);

    assert_near(r.roi1.intersection, layout.cross1, 1.0);
    assert_near(r.roi2.intersection, layout.cross2, 1.0);

    assert_eq!(r.measurements.len(), 2);
    assert_eq!(r.measurements[0].index_diff, 20);
    assert_eq!(r.measurements[1].index_diff, 0);
    assert_eq!(r.logs.count(Severity::Error), 0);

    assert_eq!(out.edge_raster.dimensions(), (640, 480));
    assert_eq!(out.overlay_raster.dimensions(), (640, 480));
    for stage in ["edges", "ticks_horizontal", "lines_roi1", "render"] {
        assert!(r.timings.stage_ms(stage).is_some(), "missing stage {stage}");
    }
}

#[test]
fn portrait_input_is_rotated_back_to_landscape() {
    init_logging();
    let layout = TargetLayout::default();
    let portrait = imageops::rotate90(&calibration_target(&layout));
    assert!(portrait.height() > portrait.width());
    let out = run_calibration(&DynamicImage::ImageLuma8(portrait), 1, &target_config())
        .expect("calibration");
    let r = &out.result;
    assert!(r.rotated_to_landscape);
    assert_eq!((r.image_width, r.image_height), (640, 480));
    assert_near(r.roi1.intersection, layout.cross1, 1.0);
}

#[test]
fn exif_orientation_is_applied_before_measuring() {
    init_logging();
    let layout = TargetLayout::default();
    // Stored rotated counter-clockwise; code 6 asks for a clockwise turn on display.
    let stored = imageops::rotate270(&calibration_target(&layout));
    let out = run_calibration(&DynamicImage::ImageLuma8(stored), 6, &target_config())
        .expect("calibration");
    let r = &out.result;
    assert_eq!(r.exif_orientation, 6);
    assert!(!r.rotated_to_landscape);
    assert_near(r.roi1.intersection, layout.cross1, 1.0);
    assert_near(r.roi2.intersection, layout.cross2, 1.0);
}

#[test]
fn file_run_writes_edge_and_overlay_rasters() {
    init_logging();
    let tmp = tempfile::tempdir().expect("temp dir");
    let dir = tmp.path();
    let input = dir.join("scan01.png");
    calibration_target(&TargetLayout::default())
        .save(&input)
        .expect("write input");

    let files = run_calibration_file(&input, &dir.join("out"), &target_config()).expect("run");
    assert_eq!(files.outputs.edge, dir.join("out").join("scan01_edge.png"));
    assert_eq!(files.outputs.overlay, dir.join("out").join("scan01_overlay.png"));
    assert!(files.outputs.edge.is_file());
    assert!(files.outputs.overlay.is_file());
    assert_eq!(files.result.exif_orientation, 1);

    let edge = image::open(&files.outputs.edge).expect("edge raster");
    assert_eq!((edge.width(), edge.height()), (640, 480));
}

#[test]
fn missing_file_is_an_error() {
    let cfg = CalibConfig::default();
    let res = run_calibration_file(
        std::path::Path::new("/nonexistent/film.png"),
        &std::env::temp_dir(),
        &cfg,
    );
    assert!(matches!(res, Err(CalibError::Io(_)) | Err(CalibError::InvalidInput(_))));
}
