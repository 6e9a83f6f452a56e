use crate::types::Rect;

/// Borrowed 8-bit single-channel view with an explicit row stride.
///
/// Crops share the parent buffer: `crop` only moves the slice start and
/// narrows `w`/`h`, the stride stays that of the parent.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // elements between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Sub-view over `rect`, clipped to the view bounds.
    ///
    /// Returns `None` when the clipped rectangle is empty.
    pub fn crop(&self, rect: Rect) -> Option<ImageU8<'a>> {
        let x0 = rect.x.max(0) as usize;
        let y0 = rect.y.max(0) as usize;
        let x1 = (rect.right().max(0) as usize).min(self.w);
        let y1 = (rect.bottom().max(0) as usize).min(self.h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        let start = y0 * self.stride + x0;
        Some(ImageU8 {
            w: x1 - x0,
            h: y1 - y0,
            stride: self.stride,
            data: &self.data[start..],
        })
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn crop_shares_stride_and_clips() {
        let data: Vec<u8> = (0..20).collect();
        let img = ImageU8 {
            w: 5,
            h: 4,
            stride: 5,
            data: &data,
        };
        let sub = img.crop(Rect::new(3, 1, 10, 2)).expect("non-empty crop");
        assert_eq!((sub.w, sub.h, sub.stride), (2, 2, 5));
        assert_eq!(sub.row(0), &[8, 9]);
        assert_eq!(sub.row(1), &[13, 14]);
        assert!(img.crop(Rect::new(6, 0, 2, 2)).is_none());
    }
}
