//! Owned 8-bit grayscale buffer and color→gray conversion.
use super::ImageU8;
use image::{DynamicImage, GrayImage, RgbImage};

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            stride: width,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}

impl From<GrayImage> for GrayImageU8 {
    fn from(img: GrayImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self::new(width, height, img.into_raw())
    }
}

/// BT.601 luma of an 8-bit RGB triple, rounded to nearest.
#[inline]
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    let v = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB buffer to grayscale with BT.601 weights.
pub fn rgb_to_gray(rgb: &RgbImage) -> GrayImageU8 {
    let data = rgb
        .pixels()
        .map(|p| luma_bt601(p.0[0], p.0[1], p.0[2]))
        .collect();
    GrayImageU8::new(rgb.width() as usize, rgb.height() as usize, data)
}

/// Grayscale copy of any decoded image; single-channel 8-bit input is
/// copied through unchanged.
pub fn to_gray(image: &DynamicImage) -> GrayImageU8 {
    match image {
        DynamicImage::ImageLuma8(gray) => GrayImageU8::from(gray.clone()),
        other => rgb_to_gray(&other.to_rgb8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn luma_passthrough_is_identity() {
        let mut g = GrayImage::new(3, 2);
        g.put_pixel(1, 1, Luma([77]));
        let out = to_gray(&DynamicImage::ImageLuma8(g));
        assert_eq!(out.as_view().get(1, 1), 77);
        assert_eq!(out.as_view().get(0, 0), 0);
    }

    #[test]
    fn rgb_uses_bt601_weights() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([255, 255, 255]));
        let out = rgb_to_gray(&rgb);
        assert_eq!(out.as_view().get(0, 0), 76);
        assert_eq!(out.as_view().get(1, 0), 255);
    }
}
