//! CLI output formatting for padding runs.
//!
//! Every job is shown as a header line (1-based input position plus source)
//! followed by an indented status line:
//!
//! ```text
//! 001 in/photo.jpg → out/photo.jpg
//!     padded: 100x80 → 104x78
//! 002 in/square.png → out/square.png
//!     unchanged: 400x400
//! 003 in/missing.png
//!     failed: Error opening file in/missing.png: IO error: ...
//!
//! 1 padded, 1 unchanged, 1 failed (3 total)
//! ```
//!
//! Format functions return `Vec<String>` and do no I/O; `print_*` wrappers
//! write to stdout. Events arrive in completion order, so positions may be
//! printed out of sequence in parallel runs.

use crate::process::{BatchSummary, JobEvent, JobOutcome};

/// Format a 0-based index as a 3-digit, 1-based position.
fn format_index(index: usize) -> String {
    format!("{:0>3}", index + 1)
}

fn dims((w, h): (u32, u32)) -> String {
    format!("{w}x{h}")
}

/// Format what a job did to its image.
pub fn format_outcome(outcome: &JobOutcome) -> String {
    match outcome {
        JobOutcome::Padded { source, output } => {
            format!("padded: {} \u{2192} {}", dims(*source), dims(*output))
        }
        JobOutcome::Passthrough { dimensions } => format!("unchanged: {}", dims(*dimensions)),
    }
}

/// Format one job event as a header plus status line.
pub fn format_job_event(event: &JobEvent) -> Vec<String> {
    match event {
        JobEvent::Completed {
            index,
            source,
            destination,
            outcome,
        } => vec![
            format!("{} {} \u{2192} {}", format_index(*index), source, destination),
            format!("    {}", format_outcome(outcome)),
        ],
        JobEvent::Failed {
            index,
            source,
            error,
        } => vec![
            format!("{} {}", format_index(*index), source),
            format!("    failed: {}", error),
        ],
    }
}

/// Format the closing summary of a batch.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    vec![String::new(), summary.to_string()]
}

pub fn print_job_event(event: &JobEvent) {
    for line in format_job_event(event) {
        println!("{}", line);
    }
}

pub fn print_summary(summary: &BatchSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
