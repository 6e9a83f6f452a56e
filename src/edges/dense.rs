//! Locate the sub-window with the highest edge density.
//!
//! Rows and columns are scanned independently: the best row band and the
//! best column band maximise the summed per-line edge counts over a window of
//! fixed size. Both scans are O(W + H).
use super::map::EdgeMap;
use crate::types::Rect;
use log::debug;

/// Start index of the window of `win` consecutive entries with the largest
/// sum. Ties keep the earliest window.
pub fn best_window_start(sums: &[u32], win: usize) -> usize {
    if sums.is_empty() {
        return 0;
    }
    let win = win.clamp(1, sums.len());
    let mut cur: u64 = sums[..win].iter().map(|&v| v as u64).sum();
    let mut best = cur;
    let mut best_idx = 0;
    for i in win..sums.len() {
        cur = cur + sums[i] as u64 - sums[i - win] as u64;
        if cur > best {
            best = cur;
            best_idx = i - win + 1;
        }
    }
    best_idx
}

/// Dense window of nominal size `window_w`×`window_h`.
///
/// The end bound of each band is `min(start + win, extent - 1)`. A band with
/// no positive span is replaced by a centred band of `max(2, extent / 3)`.
/// The returned flag is true when that fallback was taken.
pub fn locate_dense_window(edges: &EdgeMap, window_h: usize, window_w: usize) -> (Rect, bool) {
    let w = edges.w as i32;
    let h = edges.h as i32;
    let win_h = window_h.clamp(1, edges.h.max(1));
    let win_w = window_w.clamp(1, edges.w.max(1));

    let y_start = best_window_start(&edges.row_counts(), win_h) as i32;
    let x_start = best_window_start(&edges.col_counts(), win_w) as i32;
    let y_end = (y_start + win_h as i32).min(h - 1);
    let x_end = (x_start + win_w as i32).min(w - 1);

    let valid = x_start >= 0 && y_start >= 0 && x_start < w && y_start < h;
    if valid && x_end > x_start && y_end > y_start {
        debug!("dense window x=[{x_start}, {x_end}) y=[{y_start}, {y_end})");
        return (Rect::from_corners(x_start, y_start, x_end, y_end), false);
    }

    let (x0, x1) = centred_band(w);
    let (y0, y1) = centred_band(h);
    debug!("dense window fallback x=[{x0}, {x1}) y=[{y0}, {y1})");
    (Rect::from_corners(x0, y0, x1, y1), true)
}

fn centred_band(extent: i32) -> (i32, i32) {
    let span = (extent / 3).max(2);
    let start = ((extent - span) / 2).max(0);
    let end = (start + span).min(extent - 1).max(start + 1).min(extent);
    (start, end)
}
