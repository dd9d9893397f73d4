//! Build reports: the serialisable outcome of one figure build.

use crate::error::StepFailure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The external-tool steps of the pipeline.
///
/// Only the subprocess steps appear here — parameter scanning, wrapper
/// generation, finalize and cleanup either succeed or abort the build, so
/// they never show up as a recorded failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// gnuplot rendering the script into a LaTeX fragment and an EPS file.
    Render,
    /// ps2pdf converting the EPS to a content-cropped PDF.
    Convert,
    /// pdflatex compiling the generated wrapper document.
    Typeset,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Render => "render",
            Step::Convert => "convert",
            Step::Typeset => "typeset",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one figure build.
///
/// Returned by [`crate::build::build_figure`] even when tool steps failed
/// (check [`failures`](Self::failures)); a fatal error is returned as
/// `Err(FigureError)` instead and produces no report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureReport {
    /// The input script path, as given on the command line.
    pub input: String,
    /// The final PDF path (`<base>.pdf`).
    pub output: PathBuf,
    /// Page width in centimetres used for the wrapper document.
    pub width: f64,
    /// Page height in centimetres used for the wrapper document.
    pub height: f64,
    /// Tool steps that exited non-zero, in pipeline order.
    pub failures: Vec<StepFailure>,
    /// Wall-clock duration of the whole build.
    pub duration_ms: u64,
}

impl FigureReport {
    /// True when every tool step exited zero.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FigureReport {
        FigureReport {
            input: "plot.gpl".into(),
            output: PathBuf::from("plot.pdf"),
            width: 4.0,
            height: 8.0,
            failures: vec![StepFailure {
                step: Step::Convert,
                code: Some(1),
                output: "gs: no such file".into(),
            }],
            duration_ms: 1234,
        }
    }

    #[test]
    fn step_display_names() {
        assert_eq!(Step::Render.to_string(), "render");
        assert_eq!(Step::Convert.to_string(), "convert");
        assert_eq!(Step::Typeset.to_string(), "typeset");
    }

    #[test]
    fn is_clean_tracks_failures() {
        let mut r = sample();
        assert!(!r.is_clean());
        r.failures.clear();
        assert!(r.is_clean());
    }

    #[test]
    fn report_json_round_trip() {
        let r = sample();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"convert\""), "got: {json}");
        let back: FigureReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.input, r.input);
        assert_eq!(back.failures.len(), 1);
        assert_eq!(back.failures[0].step, Step::Convert);
        assert_eq!(back.failures[0].code, Some(1));
    }
}
