//! Pipeline stages for gnuplot-to-PDF conversion.
//!
//! Each submodule implements exactly one concern. Keeping stages separate
//! makes each independently testable and lets us swap implementations
//! (e.g. a different converter invocation) without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! params ──▶ render ──▶ wrapper ──▶ convert ──▶ typeset ──▶ finalize/clean
//! (regex)   (gnuplot)  (LaTeX gen)  (ps2pdf)   (pdflatex)   (fs moves)
//! ```
//!
//! 1. [`params`]  — scan the script for `plotheight` / `plotwidth`
//! 2. [`exec`]    — spawn one tool with a structured argument list and
//!    capture its output; shared by the render, convert and typeset steps
//! 3. [`wrapper`] — generate the sized LaTeX wrapper document
//!
//! The render/convert/typeset argument lists and the finalize/cleanup file
//! moves live in [`crate::build`], which strings the stages together.

pub mod exec;
pub mod params;
pub mod wrapper;
