//! # gpl2pdf
//!
//! Turn a gnuplot script into a cropped PDF figure.
//!
//! ## Why this crate?
//!
//! gnuplot's `epslatex`-style terminals split a figure into two halves: an
//! EPS file with the graphics and a LaTeX fragment with the labels. Getting
//! from there to a single self-contained PDF sized exactly to the plot means
//! chaining three more tools (ps2pdf, pdflatex, a final file move) and
//! deleting five intermediate files — tedious and error-prone by hand for
//! every figure of a paper. This crate runs the whole chain as one batch
//! command.
//!
//! ## Pipeline Overview
//!
//! ```text
//! gnuplot script (.gpl)
//!  │
//!  ├─ 1. Scan      read plotheight / plotwidth assignments from the script
//!  ├─ 2. Render    gnuplot → <base>.tex fragment + <base>.eps graphics
//!  ├─ 3. Wrap      generate <base>_tmp.tex sized to the scanned dimensions
//!  ├─ 4. Convert   ps2pdf -dEPSCrop → content-cropped <base>.pdf
//!  ├─ 5. Typeset   pdflatex → <base>_tmp.pdf
//!  ├─ 6. Finalize  move <base>_tmp.pdf over <base>.pdf
//!  └─ 7. Clean     delete every intermediate artifact
//! ```
//!
//! A tool that exits non-zero is reported and the pipeline *continues*: a
//! half-broken figure you can inspect beats an aborted batch. Only errors in
//! the machinery itself — an unreadable script, a tool that cannot be
//! spawned, a missing file at finalize or cleanup time — abort the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gpl2pdf::{build_figure, BuildConfig};
//!
//! fn main() -> Result<(), gpl2pdf::FigureError> {
//!     let config = BuildConfig::default();
//!     let report = build_figure("plot.gpl", &config)?;
//!     println!("{} → {}", report.input, report.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `gpl2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! gpl2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod build;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use build::{base_name, build_batch, build_figure};
pub use config::{BuildConfig, BuildConfigBuilder};
pub use error::{FigureError, StepFailure};
pub use pipeline::params::PlotSize;
pub use progress::{BuildProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{FigureReport, Step};
