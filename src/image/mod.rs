pub mod f32;
pub mod gray;
pub mod io;
pub mod orient;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::gray::{to_gray, GrayImageU8};
pub use self::orient::{apply_exif_orientation, normalize_orientation, Normalized};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
