//! Image codec trait and shared error type.
//!
//! The [`ImageBackend`] trait is the only I/O seam of the pipeline: open a
//! raster from a path, save one to a path. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests swap in an in-memory mock.

use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Trait for image codecs.
pub trait ImageBackend: Sync {
    /// Decode the image at `path`.
    fn open(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` to `path`, format chosen from the extension.
    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError>;
}
