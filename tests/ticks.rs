mod common;

use common::init_logging;
use common::synthetic_image::{draw_horizontal_ruler, draw_vertical_ruler, PAPER};
use film_calib::diagnostics::Severity;
use film_calib::image::GrayImageU8;
use film_calib::ticks::{
    detect_ticks, repair_spacing, RepairParams, RulerOrientation, TickParams, TickSet,
};
use image::{GrayImage, Luma};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn ruler_strip(xs: &[i32]) -> GrayImageU8 {
    let mut img = GrayImage::from_pixel(320, 24, Luma([PAPER]));
    draw_horizontal_ruler(&mut img, xs, 2, 22, 2);
    GrayImageU8::from(img)
}

#[test]
fn missing_tick_is_detected_as_gap_and_restored() {
    init_logging();
    let xs: Vec<i32> = (0..15).map(|k| 10 + 20 * k).filter(|&x| x != 150).collect();
    let strip = ruler_strip(&xs);
    let detected = detect_ticks(strip.as_view(), RulerOrientation::Horizontal, &TickParams::default());
    // two-pixel marks: centre of mass sits on the right pixel after rounding
    let expected: Vec<i32> = xs.iter().map(|x| x + 1).collect();
    assert_eq!(detected.as_slice(), expected.as_slice());

    let (repaired, stats) = repair_spacing(&detected, &RepairParams::default());
    assert_eq!(stats.base_spacing, 20);
    assert_eq!(stats.large_gap_indices.len(), 1);
    assert_eq!(stats.inserted_total, 1);
    let full: Vec<i32> = (0..15).map(|k| 11 + 20 * k).collect();
    assert_eq!(repaired.as_slice(), full.as_slice());
}

#[test]
fn vertical_ruler_ticks_follow_rows() {
    init_logging();
    let mut img = GrayImage::from_pixel(24, 200, Luma([PAPER]));
    let ys: Vec<i32> = (0..9).map(|k| 15 + 20 * k).collect();
    draw_vertical_ruler(&mut img, &ys, 2, 22, 2);
    let strip = GrayImageU8::from(img);
    let detected = detect_ticks(strip.as_view(), RulerOrientation::Vertical, &TickParams::default());
    assert_eq!(detected.len(), ys.len());
    assert!((detected.mean_spacing().expect("spacing") - 20.0).abs() < 1e-9);
}

#[test]
fn uniform_spacing_is_left_alone() {
    let ticks = TickSet::from_positions((0..12).map(|k| 7 + 12 * k).collect());
    let (repaired, stats) = repair_spacing(&ticks, &RepairParams::default());
    assert_eq!(repaired, ticks);
    assert_eq!(stats.inserted_total, 0);
    assert!(stats.small_gap_indices.is_empty() && stats.large_gap_indices.is_empty());
    assert_eq!(stats.log.count(Severity::Error), 0);
}

#[test]
fn triple_gap_gets_two_ticks() {
    let ticks = TickSet::from_positions(vec![0, 10, 20, 30, 60, 70, 80]);
    let (repaired, stats) = repair_spacing(&ticks, &RepairParams::default());
    assert_eq!(stats.inserted_total, 2);
    assert_eq!(repaired.as_slice(), &[0, 10, 20, 30, 40, 50, 60, 70, 80]);
}

#[test]
fn short_gap_is_reported_and_ticks_kept() {
    let ticks = TickSet::from_positions(vec![0, 10, 20, 23, 33, 43]);
    let (repaired, stats) = repair_spacing(&ticks, &RepairParams::default());
    assert_eq!(repaired, ticks);
    assert!(stats.small_gap_error);
    assert_eq!(stats.small_gap_indices, vec![2]);
    assert_eq!(stats.inserted_total, 0);
    assert_eq!(stats.log.count(Severity::Error), 1);
}

#[test]
fn detection_on_noise_is_sorted_and_in_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let w = rng.gen_range(1..120u32);
        let h = rng.gen_range(1..30u32);
        let img = GrayImage::from_fn(w, h, |_, _| Luma([rng.gen::<u8>()]));
        let strip = GrayImageU8::from(img);
        for orientation in [RulerOrientation::Horizontal, RulerOrientation::Vertical] {
            let ticks = detect_ticks(strip.as_view(), orientation, &TickParams::default());
            let extent = match orientation {
                RulerOrientation::Horizontal => w as i32,
                RulerOrientation::Vertical => h as i32,
            };
            assert!(ticks.as_slice().windows(2).all(|p| p[0] < p[1]));
            assert!(ticks.iter().all(|&t| (0..extent).contains(&t)));
        }
    }
}
