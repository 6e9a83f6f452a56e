//! Annotation drawing shared by the edge and overlay rasters.
use crate::types::Rect;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as DrawRect;

/// One annotation primitive. Rectangles are given by inclusive corners.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rect {
        p1: (i32, i32),
        p2: (i32, i32),
        color: [u8; 3],
        thickness: u32,
    },
    Line {
        p1: [f64; 2],
        p2: [f64; 2],
        color: [u8; 3],
        thickness: u32,
    },
    FilledCircle {
        center: [f64; 2],
        radius: i32,
        color: [u8; 3],
    },
}

impl DrawOp {
    /// Outline of a rectangle from its origin to its far corner.
    pub fn outline(rect: Rect, color: [u8; 3], thickness: u32) -> Self {
        DrawOp::Rect {
            p1: (rect.x, rect.y),
            p2: (rect.right(), rect.bottom()),
            color,
            thickness,
        }
    }
}

fn draw_rect(canvas: &mut RgbImage, p1: (i32, i32), p2: (i32, i32), color: Rgb<u8>, thickness: u32) {
    let (x0, x1) = (p1.0.min(p2.0), p1.0.max(p2.0));
    let (y0, y1) = (p1.1.min(p2.1), p1.1.max(p2.1));
    // strokes grow inward and outward around the nominal outline
    let inner = (thickness.saturating_sub(1) / 2) as i32;
    for k in -inner..(thickness as i32 - inner) {
        let w = x1 - x0 + 1 + 2 * k;
        let h = y1 - y0 + 1 + 2 * k;
        if w <= 0 || h <= 0 {
            continue;
        }
        let r = DrawRect::at(x0 - k, y0 - k).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(canvas, r, color);
    }
}

fn draw_line(canvas: &mut RgbImage, p1: [f64; 2], p2: [f64; 2], color: Rgb<u8>, thickness: u32) {
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];
    let len = dx.hypot(dy).max(1e-12);
    let (nx, ny) = (-dy / len, dx / len);
    let t = thickness.max(1) as i32;
    let first = -(t - 1) / 2;
    for k in first..first + t {
        let ox = nx * k as f64;
        let oy = ny * k as f64;
        draw_line_segment_mut(
            canvas,
            ((p1[0] + ox) as f32, (p1[1] + oy) as f32),
            ((p2[0] + ox) as f32, (p2[1] + oy) as f32),
            color,
        );
    }
}

/// Apply `ops` in order.
pub fn apply_draw_ops(canvas: &mut RgbImage, ops: &[DrawOp]) {
    for op in ops {
        match *op {
            DrawOp::Rect {
                p1,
                p2,
                color,
                thickness,
            } => draw_rect(canvas, p1, p2, Rgb(color), thickness),
            DrawOp::Line {
                p1,
                p2,
                color,
                thickness,
            } => draw_line(canvas, p1, p2, Rgb(color), thickness),
            DrawOp::FilledCircle {
                center,
                radius,
                color,
            } => draw_filled_circle_mut(
                canvas,
                (center[0].round() as i32, center[1].round() as i32),
                radius,
                Rgb(color),
            ),
        }
    }
}
