//! Job descriptors: the wire shape and its validated form.
//!
//! Descriptors arrive as JSON objects with PascalCase keys:
//!
//! ```json
//! { "Source": "in/photo.jpg", "Destination": "out/photo.jpg", "AspectRatio": [4, 5] }
//! ```
//!
//! Ratio components are decoded as signed integers so that zero or negative
//! values surface as a [`JobError::Configuration`] for that job instead of a
//! JSON error for the whole batch.

use crate::imaging::AspectRatio;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Invalid job for {source_path}: {message}")]
    Configuration {
        source_path: String,
        message: String,
    },
}

/// A job as decoded from JSON, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobDescriptor {
    pub source: String,
    pub destination: String,
    pub aspect_ratio: [i64; 2],
}

/// A validated, immutable padding job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub ratio: AspectRatio,
}

impl ImageJob {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, ratio: AspectRatio) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ratio,
        }
    }
}

impl TryFrom<JobDescriptor> for ImageJob {
    type Error = JobError;

    fn try_from(descriptor: JobDescriptor) -> Result<Self, Self::Error> {
        let invalid = |message: String| JobError::Configuration {
            source_path: descriptor.source.clone(),
            message,
        };

        if descriptor.source.is_empty() {
            return Err(invalid("Source must not be empty".into()));
        }
        if descriptor.destination.is_empty() {
            return Err(invalid("Destination must not be empty".into()));
        }

        let [w, h] = descriptor.aspect_ratio;
        let ratio = u32::try_from(w)
            .ok()
            .zip(u32::try_from(h).ok())
            .and_then(|(w, h)| AspectRatio::new(w, h))
            .ok_or_else(|| {
                invalid(format!(
                    "AspectRatio components must be positive, got [{w}, {h}]"
                ))
            })?;

        Ok(ImageJob::new(descriptor.source, descriptor.destination, ratio))
    }
}
