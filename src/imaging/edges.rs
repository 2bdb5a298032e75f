//! Edge-color sampling along the long axis.
//!
//! The two bands are aggregated with `rayon::join`: one closure runs on the
//! calling thread while the other may be stolen by a pool worker. Results are
//! slotted by position (top/left first), never by completion order.

use super::calculations::{Band, Multipliers, edge_bands};
use super::color::Color;
use super::error::PadError;
use super::strategy::ColorAggregator;
use image::{RgbaImage, imageops};

/// Colors sampled from the two opposite edge bands of the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeColors {
    /// Top band (horizontal long axis) or left band (vertical).
    pub first: Color,
    /// Bottom band or right band.
    pub second: Color,
}

pub fn edge_colors<A>(
    source: &RgbaImage,
    multipliers: &Multipliers,
    aggregator: &A,
) -> Result<EdgeColors, PadError>
where
    A: ColorAggregator + ?Sized,
{
    let (width, height) = source.dimensions();
    let (band_a, band_b) = edge_bands(width, height, multipliers.long_axis());
    if band_a.is_empty() {
        return Err(PadError::DegenerateRegion {
            width: band_a.width,
            height: band_a.height,
        });
    }

    let (first, second) = rayon::join(
        || aggregator.aggregate(&crop_band(source, band_a)),
        || aggregator.aggregate(&crop_band(source, band_b)),
    );

    Ok(EdgeColors {
        first: first?,
        second: second?,
    })
}

fn crop_band(source: &RgbaImage, band: Band) -> RgbaImage {
    imageops::crop_imm(source, band.x, band.y, band.width, band.height).to_image()
}
