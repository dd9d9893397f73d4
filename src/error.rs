//! Error types for the gpl2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`FigureError`] — **Fatal**: the build cannot proceed (unreadable
//!   script, a tool that cannot be spawned, a missing file at finalize or
//!   cleanup time). Returned as `Err(FigureError)` from the `build_*`
//!   functions and aborts any remaining batch inputs.
//!
//! * [`StepFailure`] — **Non-fatal**: an external tool ran and exited
//!   non-zero. Recorded in [`crate::report::FigureReport`] and reported
//!   through the progress callback; the pipeline continues with the next
//!   step regardless.
//!
//! The separation encodes the pipeline's error policy: a tool complaining
//! about a figure is routine (gnuplot warnings, LaTeX overfull boxes) and
//! the remaining steps often still produce a usable PDF, whereas a missing
//! intermediate file means the chain is genuinely broken.

use crate::report::Step;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the gpl2pdf library.
///
/// Tool-exit failures use [`StepFailure`] and are stored in
/// [`crate::report::FigureReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum FigureError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input path does not end in a 4-character extension.
    #[error("Input '{input}' does not end in a 4-character extension (expected something like 'plot.gpl')")]
    InvalidInput { input: String },

    /// The gnuplot script could not be read.
    #[error("Failed to read gnuplot script '{path}': {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scanned plot dimension did not parse as a number.
    #[error("Bad plot dimension '{text}': {source}")]
    BadDimension {
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    // ── Tool errors ───────────────────────────────────────────────────────
    /// An external tool could not be started at all.
    ///
    /// A tool that starts and exits non-zero is a [`StepFailure`], not this.
    #[error("Failed to spawn '{tool}': {source}\nCheck the tool is installed and on PATH.")]
    SpawnFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    // ── File errors ───────────────────────────────────────────────────────
    /// The wrapper document could not be written.
    #[error("Failed to write wrapper document '{path}': {source}")]
    WrapperWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving the typeset PDF into its final place failed.
    #[error("Failed to move '{from}' to '{to}': {source}")]
    FinalizeFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An intermediate artifact could not be removed during cleanup.
    ///
    /// Usually means an earlier step never produced it — the chain is
    /// broken, so this aborts the batch rather than limping on.
    #[error("Failed to remove intermediate '{path}': {source}")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal failure of one external-tool step.
///
/// Stored in [`crate::report::FigureReport::failures`] when a tool exits
/// non-zero. The build continues unless a later step hits a fatal error.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{step} step failed ({})", exit_label(.code))]
pub struct StepFailure {
    /// Which pipeline step the tool belonged to.
    pub step: Step,
    /// Exit code, or `None` when the tool was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout followed by stderr of the failed invocation.
    pub output: String,
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "killed by signal".to_string(),
    }
}
