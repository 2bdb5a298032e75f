//! Color aggregation strategies: one representative color per pixel region.
//!
//! | Strategy | Method |
//! |---|---|
//! | [`Strategy::Average`] | area-averaging downsample to a single pixel |
//! | [`Strategy::Dominant`] | k-means clustering, most prominent cluster |
//! | [`Strategy::Prominent`] | HCL hue histogram, most populated hue bucket |
//!
//! Everything downstream only sees the [`ColorAggregator`] trait, so tests can
//! substitute a recording mock.

use super::color::{Color, Hcl};
use super::dominant::dominant_color;
use super::error::PadError;
use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of integer hue buckets.
const HUE_BUCKETS: usize = 360;

/// Maps a pixel region to a single color.
///
/// `Sync` because the two edge bands are aggregated on different threads.
pub trait ColorAggregator: Sync {
    fn aggregate(&self, region: &RgbaImage) -> Result<Color, PadError>;
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Average,
    Dominant,
    #[default]
    Prominent,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Average => "average",
            Strategy::Dominant => "dominant",
            Strategy::Prominent => "prominent",
        };
        f.write_str(name)
    }
}

impl ColorAggregator for Strategy {
    fn aggregate(&self, region: &RgbaImage) -> Result<Color, PadError> {
        let (width, height) = region.dimensions();
        let degenerate = PadError::DegenerateRegion { width, height };
        if width == 0 || height == 0 {
            return Err(degenerate);
        }
        match self {
            Strategy::Average => Ok(average_color(region)),
            Strategy::Dominant => dominant_color(region).ok_or(degenerate),
            Strategy::Prominent => prominent_color(region).ok_or(degenerate),
        }
    }
}

/// Box-filter the whole region down to one pixel.
fn average_color(region: &RgbaImage) -> Color {
    let pixel = *imageops::thumbnail(region, 1, 1).get_pixel(0, 0);
    Color::from_rgba8(pixel)
}

/// Most populated integer hue bucket, with that bucket's mean chroma and
/// luminance. Ties go to the lowest hue.
fn prominent_color(region: &RgbaImage) -> Option<Color> {
    let mut counts = [0u64; HUE_BUCKETS];
    let mut chromas = [0.0f64; HUE_BUCKETS];
    let mut luminances = [0.0f64; HUE_BUCKETS];

    for pixel in region.pixels() {
        let hcl = Color::from_rgba8(*pixel).to_hcl();
        let bucket = hue_bucket(hcl.hue);
        counts[bucket] += 1;
        chromas[bucket] += hcl.chroma;
        luminances[bucket] += hcl.luminance;
    }

    let winner = (0..HUE_BUCKETS).fold(0, |best, i| {
        if counts[i] > counts[best] { i } else { best }
    });
    let count = counts[winner];
    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(Color::from_hcl(Hcl {
        hue: winner as f64,
        chroma: chromas[winner] / n,
        luminance: luminances[winner] / n,
    }))
}

fn hue_bucket(hue: f64) -> usize {
    (hue.floor() as usize).min(HUE_BUCKETS - 1)
}
