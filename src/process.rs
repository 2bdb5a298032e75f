//! The padding pipeline: one job, or many in parallel.
//!
//! A single job moves through a fixed sequence:
//!
//! ```text
//! Opened → Decided → Padded | Passthrough → Saved
//!    └────────┴────────────┴────────────────┴──→ Failed (terminal, no retry)
//! ```
//!
//! ## Parallel Processing
//!
//! Batches run on the rayon pool (sized from `[processing] max_processes` by
//! the CLI). Jobs share nothing: each owns its decoded image, and one job's
//! failure is reported as an event without stopping its siblings. Inside a
//! job, the two edge bands are aggregated with a `rayon::join` on the same
//! pool.
//!
//! ## Progress Events
//!
//! Callers can pass an `mpsc::Sender<JobEvent>`; one event is sent per job as
//! it finishes (in completion order, tagged with the job's input index).

use crate::imaging::{
    AspectRatio, BackendError, ColorAggregator, ImageBackend, PadError, PaddingDecision,
    RustBackend, fit, is_supported_image, pad_image,
};
use crate::job::{ImageJob, JobDescriptor, JobError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Error opening file {}: {source}", path.display())]
    Open { path: PathBuf, source: BackendError },
    #[error("Error saving image to {}: {source}", path.display())]
    Save { path: PathBuf, source: BackendError },
    #[error("Cannot pad {}: {source}", path.display())]
    Pad { path: PathBuf, source: PadError },
    #[error(transparent)]
    Job(#[from] JobError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a successful job did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Padded from the source dimensions to the canvas dimensions.
    Padded {
        source: (u32, u32),
        output: (u32, u32),
    },
    /// Source already matched the ratio; written unchanged.
    Passthrough { dimensions: (u32, u32) },
}

/// Progress event for one finished job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Completed {
        index: usize,
        source: String,
        destination: String,
        outcome: JobOutcome,
    },
    Failed {
        index: usize,
        source: String,
        error: String,
    },
}

/// Totals for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub padded: usize,
    pub passed_through: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.padded + self.passed_through + self.failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} padded, {} unchanged, {} failed ({} total)",
            self.padded,
            self.passed_through,
            self.failed,
            self.total()
        )
    }
}

/// Run one job with the `image`-crate codec.
pub fn compile_image(
    job: &ImageJob,
    aggregator: &(impl ColorAggregator + ?Sized),
) -> Result<JobOutcome, ProcessError> {
    compile_image_with_backend(&RustBackend::new(), job, aggregator)
}

/// Run one job using a specific backend (allows testing with mock).
pub fn compile_image_with_backend(
    backend: &(impl ImageBackend + ?Sized),
    job: &ImageJob,
    aggregator: &(impl ColorAggregator + ?Sized),
) -> Result<JobOutcome, ProcessError> {
    let image = backend
        .open(&job.source)
        .map_err(|source| ProcessError::Open {
            path: job.source.clone(),
            source,
        })?;
    let source_dims = (image.width(), image.height());

    let (multipliers, decision) = fit(source_dims.0, source_dims.1, job.ratio);
    log::debug!(
        "{}: {}x{} at {} → multipliers {:?}, {:?}",
        job.source.display(),
        source_dims.0,
        source_dims.1,
        job.ratio,
        multipliers,
        decision
    );

    let (output, outcome) = match decision {
        PaddingDecision::Passthrough => (
            image,
            JobOutcome::Passthrough {
                dimensions: source_dims,
            },
        ),
        PaddingDecision::Pad => {
            let padded = pad_image(&image, job.ratio, &multipliers, aggregator).map_err(
                |source| ProcessError::Pad {
                    path: job.source.clone(),
                    source,
                },
            )?;
            let output_dims = (padded.width(), padded.height());
            (
                padded,
                JobOutcome::Padded {
                    source: source_dims,
                    output: output_dims,
                },
            )
        }
    };

    backend
        .save(&output, &job.destination)
        .map_err(|source| ProcessError::Save {
            path: job.destination.clone(),
            source,
        })?;

    log::info!(
        "{} → {}",
        job.source.display(),
        job.destination.display()
    );
    Ok(outcome)
}

/// Validate and run decoded job descriptors.
///
/// Invalid descriptors are reported as failed jobs; they do not abort the batch.
pub fn run_descriptors(
    backend: &(impl ImageBackend + ?Sized),
    descriptors: Vec<JobDescriptor>,
    aggregator: &(impl ColorAggregator + ?Sized),
    progress: Option<Sender<JobEvent>>,
) -> BatchSummary {
    let entries = descriptors
        .into_iter()
        .map(|d| {
            let label = d.source.clone();
            (label, ImageJob::try_from(d).map_err(ProcessError::from))
        })
        .collect();
    run_entries(backend, entries, aggregator, progress)
}

/// Run already-validated jobs.
pub fn run_jobs(
    backend: &(impl ImageBackend + ?Sized),
    jobs: Vec<ImageJob>,
    aggregator: &(impl ColorAggregator + ?Sized),
    progress: Option<Sender<JobEvent>>,
) -> BatchSummary {
    let entries = jobs
        .into_iter()
        .map(|job| (job.source.display().to_string(), Ok(job)))
        .collect();
    run_entries(backend, entries, aggregator, progress)
}

type Entry = (String, Result<ImageJob, ProcessError>);

fn run_entries(
    backend: &(impl ImageBackend + ?Sized),
    entries: Vec<Entry>,
    aggregator: &(impl ColorAggregator + ?Sized),
    progress: Option<Sender<JobEvent>>,
) -> BatchSummary {
    let outcomes: Vec<Option<JobOutcome>> = entries
        .into_par_iter()
        .enumerate()
        .map(|(index, (label, entry))| {
            let result = entry.and_then(|job| {
                compile_image_with_backend(backend, &job, aggregator).map(|outcome| (job, outcome))
            });

            let (event, outcome) = match result {
                Ok((job, outcome)) => (
                    JobEvent::Completed {
                        index,
                        source: label,
                        destination: job.destination.display().to_string(),
                        outcome,
                    },
                    Some(outcome),
                ),
                Err(e) => {
                    log::warn!("job {index} failed: {e}");
                    (
                        JobEvent::Failed {
                            index,
                            source: label,
                            error: e.to_string(),
                        },
                        None,
                    )
                }
            };
            if let Some(tx) = &progress {
                // Receiver gone means nobody is listening; the batch still completes.
                tx.send(event).ok();
            }
            outcome
        })
        .collect();

    outcomes
        .into_iter()
        .fold(BatchSummary::default(), |mut summary, outcome| {
            match outcome {
                Some(JobOutcome::Padded { .. }) => summary.padded += 1,
                Some(JobOutcome::Passthrough { .. }) => summary.passed_through += 1,
                None => summary.failed += 1,
            }
            summary
        })
}

/// Plan one job per supported image under `source_dir`.
///
/// Destinations mirror the relative layout under `output_dir`; their parent
/// directories are created here. Jobs are sorted by source path. The output
/// directory itself is skipped if it lives inside the source tree.
pub fn plan_directory(
    source_dir: &Path,
    output_dir: &Path,
    ratio: AspectRatio,
) -> Result<Vec<ImageJob>, ProcessError> {
    let mut jobs = Vec::new();

    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() != output_dir);

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .unwrap_or(entry.path());
        let destination = output_dir.join(relative);
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        jobs.push(ImageJob::new(entry.path(), destination, ratio));
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Strategy;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::strategy::tests::MockAggregator;
    use crate::test_helpers::*;

    fn ratio(w: u32, h: u32) -> AspectRatio {
        AspectRatio::new(w, h).unwrap()
    }

    const BROWN: [u8; 3] = [90, 60, 30];

    // =========================================================================
    // compile_image_with_backend
    // =========================================================================

    #[test]
    fn passthrough_saves_source_unchanged() {
        let source = gradient_rgb(400, 300);
        let backend = MockBackend::new().with_image("/in.png", source.clone());
        let mock = MockAggregator::new();
        let job = ImageJob::new("/in.png", "/out.png", ratio(4, 3));

        let outcome = compile_image_with_backend(&backend, &job, &mock).unwrap();

        assert_eq!(
            outcome,
            JobOutcome::Passthrough {
                dimensions: (400, 300)
            }
        );
        assert_eq!(backend.stored("/out.png").unwrap().to_rgb8(), source.to_rgb8());
        assert!(mock.recorded().is_empty(), "no sampling on passthrough");
    }

    #[test]
    fn padding_follows_fit_geometry() {
        let backend = MockBackend::new().with_image("/in.png", solid_rgb(100, 80, BROWN));
        let job = ImageJob::new("/in.png", "/out.png", ratio(4, 3));

        let outcome = compile_image_with_backend(&backend, &job, &Strategy::Prominent).unwrap();

        assert_eq!(
            outcome,
            JobOutcome::Padded {
                source: (100, 80),
                output: (104, 78)
            }
        );
        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Open("/in.png".to_string()),
                RecordedOp::Save {
                    path: "/out.png".to_string(),
                    width: 104,
                    height: 78
                },
            ]
        );
    }

    #[test]
    fn open_failure_carries_source_path() {
        let backend = MockBackend::new();
        let job = ImageJob::new("/missing.png", "/out.png", ratio(1, 1));

        let err = compile_image_with_backend(&backend, &job, &Strategy::Average).unwrap_err();
        assert!(matches!(&err, ProcessError::Open { path, .. } if path == Path::new("/missing.png")));
        assert!(err.to_string().contains("/missing.png"));
        // Nothing written
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn save_failure_carries_destination_path() {
        let backend = MockBackend::new()
            .with_image("/in.png", solid_rgb(100, 80, BROWN))
            .with_unwritable("/ro/out.png");
        let job = ImageJob::new("/in.png", "/ro/out.png", ratio(4, 3));

        let err = compile_image_with_backend(&backend, &job, &Strategy::Average).unwrap_err();
        assert!(matches!(&err, ProcessError::Save { path, .. } if path == Path::new("/ro/out.png")));
    }

    #[test]
    fn degenerate_band_fails_without_saving() {
        // 19x100 at 1:1 → vertical axis, band thickness 0
        let backend = MockBackend::new().with_image("/in.png", solid_rgb(19, 100, BROWN));
        let job = ImageJob::new("/in.png", "/out.png", ratio(1, 1));

        let err = compile_image_with_backend(&backend, &job, &Strategy::Average).unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Pad {
                source: PadError::DegenerateRegion { .. },
                ..
            }
        ));
        assert!(backend.stored("/out.png").is_none());
    }

    #[test]
    fn below_ratio_unit_fails() {
        let backend = MockBackend::new().with_image("/in.png", solid_rgb(3, 100, BROWN));
        let job = ImageJob::new("/in.png", "/out.png", ratio(4, 3));

        let err = compile_image_with_backend(&backend, &job, &Strategy::Average).unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Pad {
                source: PadError::BelowRatioUnit { .. },
                ..
            }
        ));
    }

    // =========================================================================
    // batches
    // =========================================================================

    #[test]
    fn batch_failures_are_independent() {
        let backend = MockBackend::new()
            .with_image("/a.png", solid_rgb(100, 80, BROWN))
            .with_image("/b.png", solid_rgb(400, 300, BROWN));
        let descriptors = vec![
            descriptor("/a.png", "/a-out.png", [4, 3]),
            descriptor("/missing.png", "/m-out.png", [4, 3]),
            descriptor("/b.png", "/b-out.png", [4, 3]),
            descriptor("/a.png", "/bad-out.png", [0, 3]),
        ];
        let (tx, rx) = std::sync::mpsc::channel();

        let summary = run_descriptors(&backend, descriptors, &Strategy::Average, Some(tx));

        assert_eq!(
            summary,
            BatchSummary {
                padded: 1,
                passed_through: 1,
                failed: 2
            }
        );
        assert!(backend.stored("/a-out.png").is_some());
        assert!(backend.stored("/b-out.png").is_some());

        let mut events: Vec<JobEvent> = rx.iter().collect();
        events.sort_by_key(|e| match e {
            JobEvent::Completed { index, .. } | JobEvent::Failed { index, .. } => *index,
        });
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[1], JobEvent::Failed { source, .. } if source == "/missing.png"));
        assert!(matches!(&events[3], JobEvent::Failed { error, .. } if error.contains("positive")));
        assert!(matches!(
            &events[2],
            JobEvent::Completed {
                outcome: JobOutcome::Passthrough { .. },
                ..
            }
        ));
    }

    #[test]
    fn batch_without_listener_still_runs() {
        let backend = MockBackend::new().with_image("/a.png", solid_rgb(100, 80, BROWN));
        let jobs = vec![ImageJob::new("/a.png", "/out.png", ratio(1, 1))];
        let summary = run_jobs(&backend, jobs, &Strategy::Prominent, None);
        assert_eq!(summary.padded, 1);
        assert_eq!(summary.total(), 1);
    }

    #[test]
    fn empty_batch_is_empty_summary() {
        let summary = run_jobs(&MockBackend::new(), Vec::new(), &Strategy::Average, None);
        assert_eq!(summary, BatchSummary::default());
    }

    #[test]
    fn summary_display() {
        let summary = BatchSummary {
            padded: 3,
            passed_through: 1,
            failed: 2,
        };
        assert_eq!(summary.to_string(), "3 padded, 1 unchanged, 2 failed (6 total)");
    }

    // =========================================================================
    // plan_directory
    // =========================================================================

    #[test]
    fn plan_directory_mirrors_layout_and_skips_non_images() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().join("in");
        let out = tmp.path().join("out");
        write_png(&src, "b.png", &gradient_rgb(10, 10));
        write_png(&src.join("nested"), "a.PNG", &gradient_rgb(10, 10));
        std::fs::write(src.join("notes.txt"), "hi").unwrap();

        let jobs = plan_directory(&src, &out, ratio(1, 1)).unwrap();

        let destinations: Vec<PathBuf> = jobs.iter().map(|j| j.destination.clone()).collect();
        assert_eq!(
            destinations,
            vec![out.join("b.png"), out.join("nested").join("a.PNG")]
        );
        assert!(out.join("nested").is_dir());
    }

    #[test]
    fn plan_directory_skips_nested_output_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().to_path_buf();
        let out = src.join("padded");
        write_png(&src, "a.png", &gradient_rgb(10, 10));
        write_png(&out, "old.png", &gradient_rgb(10, 10));

        let jobs = plan_directory(&src, &out, ratio(1, 1)).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source, src.join("a.png"));
    }

    #[test]
    fn plan_directory_missing_source_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = plan_directory(&tmp.path().join("nope"), tmp.path(), ratio(1, 1));
        assert!(matches!(result, Err(ProcessError::Walk(_))));
    }
}
