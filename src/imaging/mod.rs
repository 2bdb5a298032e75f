//! Image processing: aspect fitting and edge-color padding, pure Rust.
//!
//! | Step | Module |
//! |---|---|
//! | **Fit** | [`calculations`]: multipliers, overflow, padding decision |
//! | **Sample** | [`edges`]: two edge bands, aggregated concurrently |
//! | **Aggregate** | [`strategy`]: average / dominant / prominent color |
//! | **Composite** | [`composite`]: center crop, split background, paste |
//! | **Codec** | [`backend`]: [`ImageBackend`] trait + [`RustBackend`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Colors**: [`Color`] and the HCL conversion
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`pad_image`], combining the steps on a decoded image

pub mod backend;
pub mod calculations;
pub mod color;
pub mod composite;
mod dominant;
pub mod edges;
mod error;
pub mod operations;
pub mod rust_backend;
pub mod strategy;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{AspectRatio, LongAxis, Multipliers, PaddingDecision, fit};
pub use color::{Color, Hcl};
pub use edges::{EdgeColors, edge_colors};
pub use error::PadError;
pub use operations::pad_image;
pub use rust_backend::{RustBackend, is_supported_image, supported_input_extensions};
pub use strategy::{ColorAggregator, Strategy};
