//! # edgefill
//!
//! Fits images onto a canvas of a requested aspect ratio without cropping
//! their content away and without black or white letterbox bars. The padding
//! is built from the image's own edges: two colors, one per side of the long
//! axis, each sampled from a thin band along the matching edge.
//!
//! # Pipeline
//!
//! ```text
//! open → fit ─┬─ matches ratio ──────────────────────────────→ save
//!             └─ pad: sample edge bands (in parallel)
//!                     → center-crop to whole ratio units
//!                     → split background → paste centered ──→ save
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Aspect math, edge-color strategies, compositing, image codec |
//! | [`job`] | JSON job descriptors and their validated [`job::ImageJob`] form |
//! | [`process`] | Runs one job or a parallel batch; plans jobs for a directory |
//! | [`config`] | `edgefill.toml` loading, validation and stock defaults |
//! | [`output`] | CLI output formatting for job events and batch summaries |
//!
//! # Design Decisions
//!
//! ## Pluggable Edge Colors
//!
//! Color aggregation sits behind the [`imaging::ColorAggregator`] trait. The
//! three built-in strategies are variants of [`imaging::Strategy`]; tests plug
//! in a recording mock to check which regions were sampled.
//!
//! ## Perceptual Hue Histogram
//!
//! The default `prominent` strategy buckets pixels by hue in HCL (CIE LCh on
//! D65), not HSV, so bucket widths track perceived hue differences. The
//! winning bucket's hue is reported at whole-degree resolution.
//!
//! ## Independent Jobs
//!
//! Batch jobs share no state. A failing job produces a failed event and the
//! batch carries on; the CLI exits non-zero at the end if any job failed.

pub mod config;
pub mod imaging;
pub mod job;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
