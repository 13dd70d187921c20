//! Vertical orientation correction applied before conversion

use crate::format::{FormatFamily, PixelFormat};
use crate::image::{PlanePointers, MAX_PLANES};

/// Mirror a picture vertically without copying.
///
/// Each present plane's base pointer moves to its last row and the stride is
/// negated, so row `i` of the view is row `height - 1 - i` of the original.
/// The pointers must describe a picture of at least `height` rows.
pub fn flip_vertical(picture: &PlanePointers, height: u32) -> PlanePointers {
    let mut flipped = PlanePointers::empty();
    for plane in 0..MAX_PLANES {
        if picture.data[plane].is_null() {
            continue;
        }
        let stride = picture.stride[plane];
        let last_row = (height as isize - 1) * stride as isize;
        flipped.data[plane] = picture.data[plane].wrapping_offset(last_row);
        flipped.stride[plane] = -stride;
    }
    flipped
}

/// Resolve the vertical scan-direction mismatch between the capture buffer
/// convention and the converter, which manifests only for YUV-family
/// destinations: those receive the source mirrored, RGB-family destinations
/// pass through untouched. This is the single seam to re-audit if the
/// conversion backend is ever replaced.
pub fn correct_orientation(
    picture: &PlanePointers,
    height: u32,
    dst_format: PixelFormat,
) -> PlanePointers {
    match dst_format.family() {
        FormatFamily::Yuv => flip_vertical(picture, height),
        FormatFamily::Rgb => *picture,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picture_of(data: &[u8], stride: i32) -> PlanePointers {
        let mut picture = PlanePointers::empty();
        picture.data[0] = data.as_ptr();
        picture.stride[0] = stride;
        picture
    }

    #[test]
    fn test_flip_reverses_row_order() {
        let height = 4u32;
        let stride = 8i32;
        let data = vec![0u8; (stride as usize) * height as usize];
        let picture = picture_of(&data, stride);

        let flipped = flip_vertical(&picture, height);
        assert_eq!(flipped.stride[0], -stride);
        for row in 0..height {
            let view_row = flipped.data[0].wrapping_offset(row as isize * flipped.stride[0] as isize);
            let source_row = picture.data[0]
                .wrapping_offset((height - 1 - row) as isize * stride as isize);
            assert_eq!(view_row, source_row, "view row {} mismatched", row);
        }
    }

    #[test]
    fn test_flip_skips_absent_planes() {
        let data = vec![0u8; 32];
        let picture = picture_of(&data, 8);
        let flipped = flip_vertical(&picture, 4);
        for plane in 1..MAX_PLANES {
            assert!(flipped.data[plane].is_null());
            assert_eq!(flipped.stride[plane], 0);
        }
    }

    #[test]
    fn test_yuv_destinations_are_corrected() {
        let data = vec![0u8; 32];
        let picture = picture_of(&data, 8);
        for format in [PixelFormat::I420, PixelFormat::Yv12, PixelFormat::Yvu9] {
            let corrected = correct_orientation(&picture, 4, format);
            assert_eq!(corrected.stride[0], -8);
            assert_eq!(
                corrected.data[0],
                picture.data[0].wrapping_offset(3 * 8)
            );
        }
    }

    #[test]
    fn test_rgb_destinations_pass_through() {
        let data = vec![0u8; 32];
        let picture = picture_of(&data, 8);
        for format in [PixelFormat::Rgb24, PixelFormat::Rgb0, PixelFormat::Rgb565] {
            let corrected = correct_orientation(&picture, 4, format);
            assert_eq!(corrected.data[0], picture.data[0]);
            assert_eq!(corrected.stride[0], picture.stride[0]);
        }
    }
}
