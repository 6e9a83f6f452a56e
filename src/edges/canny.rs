//! Canny edge detection: non-maximum suppression and hysteresis.
//!
//! NMS quantizes the gradient direction into four bins (0°, 45°, 90°, 135°)
//! and compares the magnitude against the two neighbours along that
//! direction. Axis-aligned bins require `>` against the preceding neighbour
//! and `>=` against the following one so that plateaus of width two keep
//! exactly one pixel; diagonal bins require `>` on both sides.
//!
//! Pixels above `high` seed edges; pixels above `low` join them when
//! 8-connected to a seed. The outermost 1-pixel frame is skipped so the
//! neighbour lookup never leaves the buffer.
use super::grad::Grad;
use super::map::EdgeMap;
use crate::image::ImageView;

const TAN_22_5_DEG: f32 = 0.414_213_57;
const TAN_67_5_DEG: f32 = 2.414_213_6;

const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Label every interior pixel as non-edge (0), weak (1) or strong (2).
pub fn suppress_non_maxima(grad: &Grad, low: f32, high: f32) -> Vec<u8> {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut labels = vec![0u8; w * h];
    if w < 3 || h < 3 {
        return labels;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let m = mag_row[x];
            if m <= low {
                continue;
            }
            let gx = gx_row[x];
            let gy = gy_row[x];
            let ax = gx.abs();
            let ay = gy.abs();

            let is_max = if ay < ax * TAN_22_5_DEG {
                m > mag_row[x - 1] && m >= mag_row[x + 1]
            } else if ay > ax * TAN_67_5_DEG {
                m > mag_prev[x] && m >= mag_next[x]
            } else if (gx < 0.0) != (gy < 0.0) {
                m > mag_prev[x + 1] && m > mag_next[x - 1]
            } else {
                m > mag_prev[x - 1] && m > mag_next[x + 1]
            };

            if is_max {
                labels[y * w + x] = if m > high { STRONG } else { WEAK };
            }
        }
    }
    labels
}

/// Grow strong seeds through 8-connected weak pixels.
pub fn hysteresis(labels: &[u8], w: usize, h: usize) -> EdgeMap {
    let mut map = EdgeMap::new(w, h);
    let mut stack: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, &l)| l == STRONG)
        .map(|(i, _)| i)
        .collect();
    for &i in &stack {
        map.data[i] = 1;
    }

    while let Some(i) = stack.pop() {
        let x = i % w;
        let y = i / w;
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let j = ny * w + nx;
                if labels[j] == WEAK && map.data[j] == 0 {
                    map.data[j] = 1;
                    stack.push(j);
                }
            }
        }
    }
    map
}

/// Full Canny pass over precomputed gradients. `low > high` is swapped.
pub fn canny(grad: &Grad, low: f32, high: f32) -> EdgeMap {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let labels = suppress_non_maxima(grad, low, high);
    hysteresis(&labels, grad.mag.w, grad.mag.h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::{sobel_gradients, GradientNorm};
    use crate::image::ImageF32;

    fn step_image(w: usize, h: usize, at: usize, hi: f32) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in at..w {
                img.set(x, y, hi);
            }
        }
        img
    }

    #[test]
    fn step_yields_single_pixel_column() {
        let img = step_image(10, 8, 5, 200.0);
        let map = canny(&sobel_gradients(&img, GradientNorm::L2), 20.0, 60.0);
        for y in 1..7 {
            let row: Vec<usize> = (0..10).filter(|&x| map.is_edge(x, y)).collect();
            assert_eq!(row, vec![4], "row {y}");
        }
        assert!((0..10).all(|x| !map.is_edge(x, 0) && !map.is_edge(x, 7)));
    }

    #[test]
    fn weak_pixels_need_a_strong_neighbour() {
        // weak-only step never survives
        let img = step_image(10, 8, 5, 10.0);
        let map = canny(&sobel_gradients(&img, GradientNorm::L2), 20.0, 60.0);
        assert_eq!(map.count(), 0);
        // same step is strong with low thresholds
        let map = canny(&sobel_gradients(&img, GradientNorm::L2), 5.0, 30.0);
        assert_eq!(map.count(), 6);
    }

    #[test]
    fn hysteresis_links_weak_chain() {
        let w = 6;
        let h = 3;
        let mut labels = vec![0u8; w * h];
        labels[w + 1] = STRONG;
        labels[w + 2] = WEAK;
        labels[2 * w + 3] = WEAK;
        labels[w + 5] = WEAK;
        let map = hysteresis(&labels, w, h);
        assert!(map.is_edge(1, 1) && map.is_edge(2, 1) && map.is_edge(3, 2));
        assert!(!map.is_edge(5, 1));
    }
}
