//! Row access shared by the borrowed 8-bit views and the owned float planes.
//!
//! The edge and tick stages only ever walk images row by row, so this is all
//! the abstraction they need.

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    /// The `w` valid pixels of row `y`, without stride padding.
    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}

/// Iterator returned by [`ImageView::rows`].
pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        (self.y < self.image.height()).then(|| {
            self.y += 1;
            self.image.row(self.y - 1)
        })
    }
}
