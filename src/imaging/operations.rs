//! High-level image operations.
//!
//! These functions combine calculations, edge sampling, and compositing on
//! decoded images. No file I/O happens here.

use super::calculations::{AspectRatio, Multipliers};
use super::composite::composite;
use super::edges::edge_colors;
use super::error::PadError;
use super::strategy::ColorAggregator;
use image::DynamicImage;

/// Pad `image` onto a split edge-color canvas of the target `ratio`.
///
/// `multipliers` must come from [`fit`](super::fit) on this image. The result
/// keeps an alpha channel only if the source had one.
pub fn pad_image<A>(
    image: &DynamicImage,
    ratio: AspectRatio,
    multipliers: &Multipliers,
    aggregator: &A,
) -> Result<DynamicImage, PadError>
where
    A: ColorAggregator + ?Sized,
{
    if multipliers.width == 0 || multipliers.height == 0 {
        return Err(PadError::BelowRatioUnit {
            width: image.width(),
            height: image.height(),
            ratio: ratio.to_string(),
        });
    }

    let rgba = image.to_rgba8();
    let colors = edge_colors(&rgba, multipliers, aggregator)?;
    log::debug!(
        "edge colors {:?} / {:?}",
        colors.first.to_rgba8().0,
        colors.second.to_rgba8().0
    );
    let canvas = composite(&rgba, ratio, multipliers, &colors)?;

    let padded = DynamicImage::ImageRgba8(canvas);
    Ok(if image.color().has_alpha() {
        padded
    } else {
        DynamicImage::ImageRgb8(padded.to_rgb8())
    })
}
