//! Canvas construction: normalize, split background, paste.
//!
//! ```text
//!   long axis horizontal        long axis vertical
//!   ┌────────────────────┐      ┌─────┬──────┬─────┐
//!   │ first              │      │first│      │sec- │
//!   ├────────────────────┤      │     │ src  │ond  │
//!   │ normalized source  │      │     │      │     │
//!   ├────────────────────┤      │     │      │     │
//!   │ second             │      └─────┴──────┴─────┘
//!   └────────────────────┘
//! ```
//!
//! The split itself is always at the canvas midpoint; the source covers the
//! middle of it, leaving one color visible on each side.

use super::calculations::{
    AspectRatio, LongAxis, Multipliers, canvas_dimensions, center_offset, crop_offset,
    normalized_dimensions,
};
use super::edges::EdgeColors;
use super::error::PadError;
use image::{RgbaImage, imageops};

/// Center-crop the source to the largest exact-ratio region.
///
/// Overflow pixels are trimmed from both sides; the extra odd pixel, if any,
/// comes off the bottom/right.
pub fn normalize(source: &RgbaImage, ratio: AspectRatio, multipliers: &Multipliers) -> RgbaImage {
    let (crop_w, crop_h) = normalized_dimensions(ratio, multipliers);
    let (src_w, src_h) = source.dimensions();
    let x = crop_offset(src_w, crop_w);
    let y = crop_offset(src_h, crop_h);
    imageops::crop_imm(source, x, y, crop_w, crop_h).to_image()
}

/// Two-color canvas sized to the ratio times the dominant multiplier.
///
/// Horizontal long axis splits top/bottom at `height / 2`; vertical splits
/// left/right at `width / 2`.
pub fn split_background(
    ratio: AspectRatio,
    multipliers: &Multipliers,
    colors: &EdgeColors,
) -> Result<RgbaImage, PadError> {
    let (width, height) =
        canvas_dimensions(ratio, multipliers).ok_or_else(|| PadError::CanvasOverflow {
            ratio: ratio.to_string(),
            scale: multipliers.dominant(),
        })?;
    let first = colors.first.to_rgba8();
    let second = colors.second.to_rgba8();

    let canvas = match multipliers.long_axis() {
        LongAxis::Horizontal => {
            let split = height / 2;
            RgbaImage::from_fn(width, height, |_, y| if y < split { first } else { second })
        }
        LongAxis::Vertical => {
            let split = width / 2;
            RgbaImage::from_fn(width, height, |x, _| if x < split { first } else { second })
        }
    };
    Ok(canvas)
}

/// Paste the normalized source, unscaled, at the center of the split canvas.
pub fn composite(
    source: &RgbaImage,
    ratio: AspectRatio,
    multipliers: &Multipliers,
    colors: &EdgeColors,
) -> Result<RgbaImage, PadError> {
    let normalized = normalize(source, ratio, multipliers);
    let mut canvas = split_background(ratio, multipliers, colors)?;

    let x = center_offset(canvas.width(), normalized.width());
    let y = center_offset(canvas.height(), normalized.height());
    imageops::replace(&mut canvas, &normalized, i64::from(x), i64::from(y));
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::calculations::fit;
    use crate::imaging::color::Color;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn colors() -> EdgeColors {
        EdgeColors {
            first: Color::from_rgba8(RED),
            second: Color::from_rgba8(BLUE),
        }
    }

    fn multipliers(width: u32, height: u32) -> Multipliers {
        Multipliers {
            width,
            height,
            width_overflow: 0,
            height_overflow: 0,
        }
    }

    fn ratio(w: u32, h: u32) -> AspectRatio {
        AspectRatio::new(w, h).unwrap()
    }

    #[test]
    fn wider_multiplier_splits_top_bottom() {
        let bg = split_background(ratio(2, 2), &multipliers(3, 2), &colors()).unwrap();
        assert_eq!(bg.dimensions(), (6, 6));
        for x in 0..6 {
            assert_eq!(*bg.get_pixel(x, 2), RED);
            assert_eq!(*bg.get_pixel(x, 3), BLUE);
        }
    }

    #[test]
    fn taller_multiplier_splits_left_right() {
        let bg = split_background(ratio(2, 2), &multipliers(2, 3), &colors()).unwrap();
        assert_eq!(bg.dimensions(), (6, 6));
        for y in 0..6 {
            assert_eq!(*bg.get_pixel(2, y), RED);
            assert_eq!(*bg.get_pixel(3, y), BLUE);
        }
    }

    #[test]
    fn odd_canvas_gives_second_color_the_extra_row() {
        // 1:1 x3 horizontal → 3x3, split at row 1
        let bg = split_background(ratio(1, 1), &multipliers(3, 2), &colors()).unwrap();
        assert_eq!(*bg.get_pixel(0, 0), RED);
        assert_eq!(*bg.get_pixel(0, 1), BLUE);
        assert_eq!(*bg.get_pixel(0, 2), BLUE);
    }

    #[test]
    fn normalize_trims_overflow_from_center() {
        let source = RgbaImage::from_fn(10, 9, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let (m, _) = fit(10, 9, ratio(4, 4));
        // 10/4 = 2 r2, 9/4 = 2 r1 → 8x8 crop at (1, 0)
        let normalized = normalize(&source, ratio(4, 4), &m);
        assert_eq!(normalized.dimensions(), (8, 8));
        assert_eq!(*normalized.get_pixel(0, 0), Rgba([1, 0, 0, 255]));
        assert_eq!(*normalized.get_pixel(7, 7), Rgba([8, 7, 0, 255]));
    }

    #[test]
    fn normalize_even_source_odd_crop_trims_less_on_the_left() {
        let source = RgbaImage::from_fn(10, 3, |x, _| Rgba([x as u8, 0, 0, 255]));
        let (m, _) = fit(10, 3, ratio(7, 1));
        // 10/7 = 1 r3 → 7-wide crop keeps columns 1..=7
        let normalized = normalize(&source, ratio(7, 1), &m);
        assert_eq!(normalized.dimensions(), (7, 3));
        assert_eq!(normalized.get_pixel(0, 0).0[0], 1);
        assert_eq!(normalized.get_pixel(6, 0).0[0], 7);
    }

    #[test]
    fn composite_end_to_end_dimensions() {
        // 100x80 at 4:3 → crop 100x78, canvas 104x78, paste at (2, 0)
        let source = RgbaImage::from_fn(100, 80, |x, y| Rgba([x as u8, y as u8, 77, 255]));
        let r = ratio(4, 3);
        let (m, _) = fit(100, 80, r);
        let out = composite(&source, r, &m, &colors()).unwrap();
        assert_eq!(out.dimensions(), (104, 78));

        // Padding columns carry the edge colors
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(1, 77), RED);
        assert_eq!(*out.get_pixel(102, 0), BLUE);
        assert_eq!(*out.get_pixel(103, 77), BLUE);

        // Source row 1 (crop starts at y = (80 - 78) / 2 = 1) lands at canvas row 0
        assert_eq!(*out.get_pixel(2, 0), Rgba([0, 1, 77, 255]));
        assert_eq!(*out.get_pixel(101, 77), Rgba([99, 78, 77, 255]));
    }

    #[test]
    fn canvas_overflow_is_an_error() {
        let m = multipliers(u32::MAX / 2, 1);
        let result = split_background(ratio(4, 3), &m, &colors());
        assert!(matches!(result, Err(PadError::CanvasOverflow { .. })));
    }
}
