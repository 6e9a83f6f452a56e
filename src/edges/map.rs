//! Binary edge map produced by Canny.
use crate::types::Rect;
use image::{Rgb, RgbImage};

/// W×H grid with values in {0, 1}; row-major, stride == width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl EdgeMap {
    /// All-zero map.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.data[y * self.w + x] = on as u8;
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Non-zero count per row.
    pub fn row_counts(&self) -> Vec<u32> {
        if self.w == 0 {
            return vec![0; self.h];
        }
        self.data
            .chunks_exact(self.w)
            .map(|row| row.iter().filter(|&&v| v != 0).count() as u32)
            .collect()
    }

    /// Non-zero count per column.
    pub fn col_counts(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.w];
        if self.w == 0 {
            return counts;
        }
        for row in self.data.chunks_exact(self.w) {
            for (c, &v) in counts.iter_mut().zip(row) {
                *c += (v != 0) as u32;
            }
        }
        counts
    }

    /// Edge pixels inside `rect` (clipped to the map), as `[x, y]` in
    /// coordinates local to the clipped rectangle origin.
    pub fn points_in(&self, rect: Rect) -> Vec<[f64; 2]> {
        let x0 = rect.x.max(0) as usize;
        let y0 = rect.y.max(0) as usize;
        let x1 = (rect.right().max(0) as usize).min(self.w);
        let y1 = (rect.bottom().max(0) as usize).min(self.h);
        let mut pts = Vec::new();
        for y in y0..y1 {
            let row = &self.data[y * self.w..(y + 1) * self.w];
            for (x, &v) in row.iter().enumerate().take(x1).skip(x0) {
                if v != 0 {
                    pts.push([(x - x0) as f64, (y - y0) as f64]);
                }
            }
        }
        pts
    }

    /// White-on-black RGB rendering.
    pub fn to_rgb(&self) -> RgbImage {
        let mut out = RgbImage::new(self.w as u32, self.h as u32);
        for (px, &v) in out.pixels_mut().zip(&self.data) {
            if v != 0 {
                *px = Rgb([255, 255, 255]);
            }
        }
        out
    }
}
