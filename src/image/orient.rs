//! Orientation normalization applied before any analysis.
//!
//! EXIF orientation values:
//! 1 = normal, 2 = mirrored, 3 = 180°, 4 = flipped vertically,
//! 5 = mirrored + 90° CW, 6 = 90° CW, 7 = mirrored + 270° CW, 8 = 270° CW.
//! Unknown codes are treated as 1.
use image::{DynamicImage, RgbImage};
use std::io::{BufRead, Seek};

/// Apply an EXIF orientation transform.
pub fn apply_exif_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Result of [`normalize_orientation`].
#[derive(Debug)]
pub struct Normalized {
    pub image: RgbImage,
    /// True when a portrait frame was turned to landscape.
    pub rotated_to_landscape: bool,
}

/// Apply EXIF rotation, force landscape (width ≥ height) with one 90°
/// counter-clockwise turn, and convert to 3-channel color.
pub fn normalize_orientation(img: DynamicImage, exif_orientation: u32) -> Normalized {
    let mut img = apply_exif_orientation(img, exif_orientation);
    let rotated_to_landscape = img.height() > img.width();
    if rotated_to_landscape {
        img = img.rotate270();
    }
    Normalized {
        image: img.to_rgb8(),
        rotated_to_landscape,
    }
}

/// Read EXIF tag 0x0112 (Orientation) from an image container.
/// Returns 1 (normal) when there is no EXIF block or no such tag.
pub fn read_exif_orientation<R: BufRead + Seek>(reader: &mut R) -> u32 {
    let exif = match exif::Reader::new().read_from_container(reader) {
        Ok(e) => e,
        Err(_) => return 1,
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn marked(w: u32, h: u32) -> DynamicImage {
        let mut img = RgbImage::new(w, h);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn exif_six_rotates_clockwise() {
        let out = apply_exif_orientation(marked(4, 2), 6).to_rgb8();
        assert_eq!(out.dimensions(), (2, 4));
        // top-left moves to top-right under a clockwise turn
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn unknown_code_is_identity() {
        let out = apply_exif_orientation(marked(4, 2), 42).to_rgb8();
        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn portrait_is_forced_to_landscape() {
        let n = normalize_orientation(marked(3, 5), 1);
        assert!(n.rotated_to_landscape);
        assert_eq!(n.image.dimensions(), (5, 3));
        // counter-clockwise turn moves top-left to bottom-left
        assert_eq!(n.image.get_pixel(0, 2).0, [255, 0, 0]);

        let n = normalize_orientation(marked(5, 3), 1);
        assert!(!n.rotated_to_landscape);
        assert_eq!(n.image.dimensions(), (5, 3));
    }
}
