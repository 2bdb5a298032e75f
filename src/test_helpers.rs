//! Shared test utilities for the edgefill test suite.
//!
//! Synthetic images with known content, PNG fixtures written to temp
//! directories, and job descriptor shorthands.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = write_png(tmp.path(), "in.png", &gradient_rgb(100, 80));
//! let job = descriptor(path.to_str().unwrap(), "out.png", [4, 3]);
//! ```

use crate::job::JobDescriptor;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Synthetic images
// =========================================================================

/// RGB image with red rising left→right and green rising top→bottom.
///
/// Every pixel differs from its neighbours, so crops and pastes can be
/// checked by position.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    DynamicImage::ImageRgb8(img)
}

/// Solid RGB image.
pub fn solid_rgb(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

// =========================================================================
// Fixture files
// =========================================================================

/// Encode `image` as PNG at `dir/name`, creating `dir` if needed.
pub fn write_png(dir: &Path, name: &str, image: &DynamicImage) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();
    path
}

// =========================================================================
// Descriptors
// =========================================================================

pub fn descriptor(source: &str, destination: &str, ratio: [i64; 2]) -> JobDescriptor {
    JobDescriptor {
        source: source.to_string(),
        destination: destination.to_string(),
        aspect_ratio: ratio,
    }
}
