//! Status-callback trait for batch, figure and step events.
//!
//! Inject an [`Arc<dyn BuildProgressCallback>`] via
//! [`crate::config::BuildConfigBuilder::progress_callback`] to receive
//! events as the pipeline works through a batch.
//!
//! # Why callbacks instead of printing?
//!
//! The pipeline itself never writes to stdout. Routing every observable
//! event through this trait keeps the driver's output contract testable
//! independently of formatting: the CLI binary renders events onto a
//! progress bar, a test harness counts them, and embedders can forward them
//! wherever they like. Captured tool output reaches the callback verbatim,
//! so nothing is lost relative to watching the tools directly.

use crate::error::StepFailure;
use crate::report::{FigureReport, Step};
use std::sync::Arc;

/// Called by the pipeline as it works through a batch of figures.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The pipeline is strictly sequential, so no two
/// methods are ever called concurrently; `Send + Sync` is still required so
/// a callback can be shared with other threads of the host application.
pub trait BuildProgressCallback: Send + Sync {
    /// Called once before the first figure of a batch.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called before each figure.
    ///
    /// # Arguments
    /// * `index` — 0-indexed position in the batch
    /// * `total` — number of figures in the batch
    /// * `input` — the input script path
    fn on_figure_start(&self, index: usize, total: usize, input: &str) {
        let _ = (index, total, input);
    }

    /// Called after the parameter scan with the page size the wrapper
    /// document will use, in centimetres.
    fn on_plot_size(&self, width: f64, height: f64) {
        let _ = (width, height);
    }

    /// Called just before an external tool is invoked.
    fn on_step_start(&self, step: Step) {
        let _ = step;
    }

    /// Called when a tool exits non-zero. The pipeline continues with the
    /// next step after this returns.
    fn on_step_failed(&self, failure: &StepFailure) {
        let _ = failure;
    }

    /// Called after a figure's cleanup completed.
    fn on_figure_complete(&self, report: &FigureReport) {
        let _ = report;
    }

    /// Called once after the last figure of a batch.
    ///
    /// # Arguments
    /// * `total` — number of figures attempted
    /// * `clean` — figures with no recorded step failure
    fn on_batch_complete(&self, total: usize, clean: usize) {
        let _ = (total, clean);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl BuildProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BuildConfig`].
pub type ProgressCallback = Arc<dyn BuildProgressCallback>;
