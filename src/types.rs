use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle, half-open: covers `x..x+width` by
/// `y..y+height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning `(x0, y0)` to `(x1, y1)`, exclusive end.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Keep the rectangle inside a `w`×`h` image with at least 2×2 pixels.
    ///
    /// The origin is limited to `[0, w-2]` and the far edge to
    /// `[x+2, w]`, so an out-of-range rectangle collapses onto the border
    /// instead of vanishing. Images narrower than 2 pixels yield the
    /// largest rectangle that fits.
    pub fn clamp_to(&self, w: i32, h: i32) -> Self {
        let (x0, x1) = clamp_span(self.x, self.right(), w);
        let (y0, y1) = clamp_span(self.y, self.bottom(), h);
        Self::from_corners(x0, y0, x1, y1)
    }
}

fn clamp_span(start: i32, end: i32, extent: i32) -> (i32, i32) {
    if extent < 2 {
        return (0, extent.max(0));
    }
    let s = start.clamp(0, extent - 2);
    (s, end.clamp(s + 2, extent))
}
