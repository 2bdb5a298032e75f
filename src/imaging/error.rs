use thiserror::Error;

/// Failures of the padding core itself (no I/O involved).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PadError {
    /// An aggregation strategy was handed a region with no pixels.
    #[error("Cannot aggregate an empty {width}x{height} region")]
    DegenerateRegion { width: u32, height: u32 },
    /// The source is smaller than one ratio unit on at least one axis.
    #[error("Image {width}x{height} is smaller than one {ratio} ratio unit")]
    BelowRatioUnit {
        width: u32,
        height: u32,
        ratio: String,
    },
    #[error("Padded canvas for {ratio} x{scale} exceeds the maximum image size")]
    CanvasOverflow { ratio: String, scale: u32 },
}
