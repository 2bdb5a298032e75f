//! Pure calculation functions for aspect fitting.
//!
//! All functions here are pure and testable without any I/O or images.
//! The compositor and the edge aggregator only ever consume the values
//! computed here; nothing downstream re-derives geometry on its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target width:height proportion. Both components are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    /// Returns `None` if either component is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl TryFrom<[u32; 2]> for AspectRatio {
    type Error = String;

    fn try_from(value: [u32; 2]) -> Result<Self, Self::Error> {
        AspectRatio::new(value[0], value[1])
            .ok_or_else(|| format!("aspect ratio components must be non-zero, got {value:?}"))
    }
}

impl From<AspectRatio> for [u32; 2] {
    fn from(ratio: AspectRatio) -> Self {
        [ratio.width, ratio.height]
    }
}

/// Parses `W:H` (also accepts `WxH`).
impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .or_else(|| s.split_once('x'))
            .ok_or_else(|| format!("expected W:H, got '{s}'"))?;
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|e| format!("invalid ratio width '{w}': {e}"))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|e| format!("invalid ratio height '{h}': {e}"))?;
        AspectRatio::try_from([width, height])
    }
}

/// How many whole ratio units fit along each axis of the source, and the
/// pixels left over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multipliers {
    pub width: u32,
    pub height: u32,
    pub width_overflow: u32,
    pub height_overflow: u32,
}

impl Multipliers {
    /// The larger of the two multipliers; scales the ratio to the canvas size.
    pub fn dominant(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn long_axis(&self) -> LongAxis {
        if self.width > self.height {
            LongAxis::Horizontal
        } else {
            LongAxis::Vertical
        }
    }
}

/// Which axis of the source is long relative to the target ratio.
///
/// Horizontal means the image is too wide: padding goes above and below,
/// edge bands are sampled from the top and bottom rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongAxis {
    Horizontal,
    Vertical,
}

/// Whether the source needs a padded canvas at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDecision {
    Pad,
    Passthrough,
}

/// Compute multipliers and the padding decision for a source of
/// `width` x `height` against `ratio`.
///
/// Padding is skipped only when the source is an exact, equally scaled
/// multiple of the ratio on both axes.
///
/// ```
/// # use edgefill::imaging::{AspectRatio, PaddingDecision, fit};
/// let ratio = AspectRatio::new(4, 3).unwrap();
/// let (m, decision) = fit(100, 80, ratio);
/// assert_eq!((m.width, m.height), (25, 26));
/// assert_eq!(decision, PaddingDecision::Pad);
///
/// let (_, decision) = fit(400, 300, ratio);
/// assert_eq!(decision, PaddingDecision::Passthrough);
/// ```
pub fn fit(width: u32, height: u32, ratio: AspectRatio) -> (Multipliers, PaddingDecision) {
    let multipliers = Multipliers {
        width: width / ratio.width,
        height: height / ratio.height,
        width_overflow: width % ratio.width,
        height_overflow: height % ratio.height,
    };

    let exact = multipliers.width_overflow == 0
        && multipliers.height_overflow == 0
        && multipliers.width == multipliers.height;

    let decision = if exact {
        PaddingDecision::Passthrough
    } else {
        PaddingDecision::Pad
    };
    (multipliers, decision)
}

/// Thickness of an edge band: `floor(0.05 * length)`.
///
/// Integer arithmetic, so there is no float rounding at the boundaries.
pub fn edge_band_thickness(length: u32) -> u32 {
    length / 20
}

/// An axis-aligned pixel rectangle inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Band {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The two opposite edge bands sampled along the long axis.
///
/// Returned in positional order: top/left first, bottom/right second.
/// Bands may be empty for tiny images; callers must reject those.
pub fn edge_bands(width: u32, height: u32, axis: LongAxis) -> (Band, Band) {
    match axis {
        LongAxis::Horizontal => {
            let t = edge_band_thickness(height);
            (
                Band {
                    x: 0,
                    y: 0,
                    width,
                    height: t,
                },
                Band {
                    x: 0,
                    y: height - t,
                    width,
                    height: t,
                },
            )
        }
        LongAxis::Vertical => {
            let t = edge_band_thickness(width);
            (
                Band {
                    x: 0,
                    y: 0,
                    width: t,
                    height,
                },
                Band {
                    x: width - t,
                    y: 0,
                    width: t,
                    height,
                },
            )
        }
    }
}

/// Dimensions of the exact-ratio region kept from the source.
pub fn normalized_dimensions(ratio: AspectRatio, multipliers: &Multipliers) -> (u32, u32) {
    (
        ratio.width * multipliers.width,
        ratio.height * multipliers.height,
    )
}

/// Dimensions of the padded canvas: the ratio scaled by the dominant multiplier.
///
/// Returns `None` if the canvas would not fit in `u32` pixels per side.
pub fn canvas_dimensions(ratio: AspectRatio, multipliers: &Multipliers) -> Option<(u32, u32)> {
    let scale = multipliers.dominant();
    Some((
        ratio.width.checked_mul(scale)?,
        ratio.height.checked_mul(scale)?,
    ))
}

/// Offset of a centered crop: `(outer - inner) / 2`.
///
/// An odd leftover puts the extra pixel on the bottom/right side.
pub fn crop_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Offset that centers `inner` inside `outer` for pasting, halving each side
/// separately.
pub fn center_offset(outer: u32, inner: u32) -> u32 {
    (outer / 2).saturating_sub(inner / 2)
}
