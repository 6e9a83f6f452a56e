use film_calib::edges::EdgeMap;
use image::{GrayImage, Luma};

pub const INK: u8 = 0;
pub const PAPER: u8 = 255;

/// Fill the half-open box `[x0, x1) × [y0, y1)` with `value`, clipped to the image.
pub fn fill_box(img: &mut GrayImage, x0: i32, y0: i32, x1: i32, y1: i32, value: u8) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for y in y0.max(0)..y1.min(h) {
        for x in x0.max(0)..x1.min(w) {
            img.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }
}

/// Horizontal ruler: `width`-pixel dark marks at each `x`, spanning rows `[y0, y1)`.
pub fn draw_horizontal_ruler(img: &mut GrayImage, xs: &[i32], y0: i32, y1: i32, width: i32) {
    for &x in xs {
        fill_box(img, x, y0, x + width, y1, INK);
    }
}

/// Vertical ruler: `height`-pixel dark marks at each `y`, spanning columns `[x0, x1)`.
pub fn draw_vertical_ruler(img: &mut GrayImage, ys: &[i32], x0: i32, x1: i32, height: i32) {
    for &y in ys {
        fill_box(img, x0, y, x1, y + height, INK);
    }
}

/// One-pixel cross centred on `(cx, cy)` with arms of `half_w` / `half_h`.
pub fn draw_cross(img: &mut GrayImage, cx: i32, cy: i32, half_w: i32, half_h: i32) {
    fill_box(img, cx - half_w, cy, cx + half_w, cy + 1, INK);
    fill_box(img, cx, cy - half_h, cx + 1, cy + half_h, INK);
}

/// Layout of the synthetic calibration target used by the end-to-end tests.
pub struct TargetLayout {
    pub width: u32,
    pub height: u32,
    pub pixels_per_mm: i32,
    pub h_ticks: Vec<i32>,
    pub v_ticks: Vec<i32>,
    pub cross1: (i32, i32),
    pub cross2: (i32, i32),
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            pixels_per_mm: 20,
            h_ticks: (0..29).map(|k| 40 + 20 * k).collect(),
            v_ticks: (0..14).map(|k| 120 + 20 * k).collect(),
            cross1: (125, 165),
            cross2: (525, 170),
        }
    }
}

/// White target with an L-shaped pair of rulers in the top-left corner and
/// two crosses to the right of the vertical ruler.
pub fn calibration_target(layout: &TargetLayout) -> GrayImage {
    let mut img = GrayImage::from_pixel(layout.width, layout.height, Luma([PAPER]));
    draw_horizontal_ruler(&mut img, &layout.h_ticks, 40, 78, 2);
    draw_vertical_ruler(&mut img, &layout.v_ticks, 40, 78, 2);
    for &(cx, cy) in &[layout.cross1, layout.cross2] {
        draw_cross(&mut img, cx, cy, 55, 55);
    }
    img
}

/// Edge map containing the digitized line `y = slope·x + intercept` over
/// `[x0, x1)` plus the vertical line `x = vx` over `[y0, y1)`.
pub fn sloped_cross_edges(
    w: usize,
    h: usize,
    slope: f64,
    intercept: f64,
    (x0, x1): (usize, usize),
    vx: usize,
    (y0, y1): (usize, usize),
) -> EdgeMap {
    let mut map = EdgeMap::new(w, h);
    for x in x0..x1 {
        let y = (slope * x as f64 + intercept).round();
        if y >= 0.0 && (y as usize) < h {
            map.set(x, y as usize, true);
        }
    }
    for y in y0..y1 {
        map.set(vx, y, true);
    }
    map
}
