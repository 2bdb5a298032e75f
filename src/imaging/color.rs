//! Normalized sRGB colors and their HCL (CIE LCh, D65) form.
//!
//! Hue bucketing for the prominent-color strategy happens in HCL so that
//! "same hue" means perceptually the same hue, not the same RGB ratio.

use image::Rgba;
use palette::white_point::D65;
use palette::{FromColor, IntoColor, Lch, LinSrgb, Srgb};

/// An sRGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Cylindrical hue/chroma/luminance form of a [`Color`].
///
/// `hue` is in degrees, `[0, 360)`. `luminance` is CIE L* (0–100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcl {
    pub hue: f64,
    pub chroma: f64,
    pub luminance: f64,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Alpha is ignored.
    pub fn from_rgba8(pixel: Rgba<u8>) -> Self {
        let [r, g, b, _] = pixel.0;
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Opaque 8-bit pixel, channels clamped and rounded.
    pub fn to_rgba8(self) -> Rgba<u8> {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            255,
        ])
    }

    pub fn to_hcl(self) -> Hcl {
        let linear: LinSrgb<f64> = Srgb::new(self.red, self.green, self.blue).into_linear();
        let lch: Lch<D65, f64> = linear.into_color();
        Hcl {
            hue: lch.hue.into_positive_degrees().rem_euclid(360.0),
            chroma: lch.chroma,
            luminance: lch.l,
        }
    }

    /// Converts back to sRGB, clamping out-of-gamut results.
    pub fn from_hcl(hcl: Hcl) -> Self {
        let lch = Lch::<D65, f64>::new(hcl.luminance, hcl.chroma, hcl.hue);
        let srgb: Srgb<f64> = Srgb::from_linear(LinSrgb::from_color(lch));
        Self::new(
            srgb.red.clamp(0.0, 1.0),
            srgb.green.clamp(0.0, 1.0),
            srgb.blue.clamp(0.0, 1.0),
        )
    }
}
