//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Used for the blurred intensity plane and the gradient buffers of the
//! edge stage. Values keep the 8-bit intensity scale (0..=255) so that the
//! Canny thresholds read the same as for integer images.
#[derive(Clone, Debug)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Promote an 8-bit view without rescaling.
    pub fn from_u8(gray: crate::image::ImageU8<'_>) -> Self {
        use crate::image::ImageView;
        let data = gray
            .rows()
            .flat_map(|row| row.iter().map(|&v| v as f32))
            .collect();
        Self {
            w: gray.w,
            h: gray.h,
            stride: gray.w,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.stride + x] = v;
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
