//! Figure build orchestration: the fixed step sequence and the batch driver.
//!
//! ## Error policy
//!
//! The pipeline is deliberately best-effort across tool exits: a gnuplot
//! warning-turned-error or a LaTeX overfull box must not cost the rest of
//! the batch, and a partially built figure is more useful on disk than
//! gone. So a tool exiting non-zero is recorded in the report and the next
//! step runs anyway. The file moves at the end are the opposite: a missing
//! intermediate means the chain is actually broken, and the resulting
//! error aborts the batch including all remaining inputs.

use crate::config::BuildConfig;
use crate::error::FigureError;
use crate::pipeline::{exec, params, wrapper};
use crate::report::{FigureReport, Step};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Intermediate artifacts removed at cleanup, in removal order.
const CLEANUP_SUFFIXES: [&str; 5] = ["_tmp.tex", "_tmp.log", "_tmp.aux", ".eps", ".tex"];

/// Strip the 4-character extension from an input path.
///
/// Every generated artifact shares this stem: `plot.gpl` → `plot`, giving
/// `plot.tex`, `plot.eps`, `plot_tmp.tex` and finally `plot.pdf`.
///
/// # Errors
/// `InvalidInput` when the path does not end in a `.` followed by three
/// characters.
pub fn base_name(input: &str) -> Result<&str, FigureError> {
    let bytes = input.as_bytes();
    if input.len() > 4 && bytes[input.len() - 4] == b'.' {
        Ok(&input[..input.len() - 4])
    } else {
        Err(FigureError::InvalidInput {
            input: input.to_string(),
        })
    }
}

/// Build one figure: run the full pipeline on a single gnuplot script.
///
/// # Returns
/// `Ok(FigureReport)` even when tool steps failed — check
/// [`FigureReport::failures`]. The final `<base>.pdf` is the only artifact
/// left on disk.
///
/// # Errors
/// Returns `Err(FigureError)` only for fatal conditions: unreadable script,
/// invalid input path, a tool that cannot be spawned, or a missing file at
/// finalize/cleanup time. Intermediates may persist in that case.
pub fn build_figure(input: &str, config: &BuildConfig) -> Result<FigureReport, FigureError> {
    let start = Instant::now();
    let base = base_name(input)?;
    info!("building figure from {input}");

    // ── Step 1: Parameter scan ───────────────────────────────────────────
    let size = params::scan_plot_size(Path::new(input))?;
    debug!("plot size {}cm × {}cm", size.width, size.height);
    if let Some(ref cb) = config.progress_callback {
        cb.on_plot_size(size.width, size.height);
    }

    let mut failures = Vec::new();

    // ── Step 2: Render ───────────────────────────────────────────────────
    let render_args = vec![
        "-e".to_string(),
        format!("outfilename='{base}.tex'"),
        input.to_string(),
    ];
    run_step(Step::Render, &config.gnuplot, &render_args, config, &mut failures)?;

    // ── Step 3: Wrapper generation ───────────────────────────────────────
    wrapper::write_wrapper(base, &size)?;

    // ── Step 4: EPS → PDF conversion ─────────────────────────────────────
    let convert_args = vec![
        "-dEPSCrop".to_string(),
        format!("{base}.eps"),
        format!("{base}.pdf"),
    ];
    run_step(Step::Convert, &config.ps2pdf, &convert_args, config, &mut failures)?;

    // ── Step 5: Typeset ──────────────────────────────────────────────────
    let typeset_args = vec![format!("{base}_tmp.tex")];
    run_step(Step::Typeset, &config.pdflatex, &typeset_args, config, &mut failures)?;

    // ── Step 6: Finalize ─────────────────────────────────────────────────
    // A raw file move: the converter already cropped to content bounds at
    // step 4, and the wrapper page is sized to the plot, so the typeset
    // PDF needs no further trimming.
    let typeset_pdf = PathBuf::from(format!("{base}_tmp.pdf"));
    let final_pdf = PathBuf::from(format!("{base}.pdf"));
    fs::rename(&typeset_pdf, &final_pdf).map_err(|source| FigureError::FinalizeFailed {
        from: typeset_pdf,
        to: final_pdf.clone(),
        source,
    })?;

    // ── Step 7: Cleanup ──────────────────────────────────────────────────
    for suffix in CLEANUP_SUFFIXES {
        let path = PathBuf::from(format!("{base}{suffix}"));
        fs::remove_file(&path).map_err(|source| FigureError::CleanupFailed {
            path: path.clone(),
            source,
        })?;
        debug!("removed {}", path.display());
    }

    info!("built {}", final_pdf.display());
    Ok(FigureReport {
        input: input.to_string(),
        output: final_pdf,
        width: size.width,
        height: size.height,
        failures,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Run one tool step under the report-and-continue policy.
fn run_step(
    step: Step,
    program: &str,
    args: &[String],
    config: &BuildConfig,
    failures: &mut Vec<crate::error::StepFailure>,
) -> Result<(), FigureError> {
    if let Some(ref cb) = config.progress_callback {
        cb.on_step_start(step);
    }

    if let Some(failure) = exec::run_tool(step, program, args)? {
        warn!("{failure}");
        debug!("captured output:\n{}", failure.output);
        if let Some(ref cb) = config.progress_callback {
            cb.on_step_failed(&failure);
        }
        failures.push(failure);
    }

    Ok(())
}

/// Build a batch of figures, in the given order.
///
/// Each input is independent (disjoint artifact set under its own base
/// name). The first fatal error aborts the batch, leaving the remaining
/// inputs unprocessed; tool-step failures never do.
pub fn build_batch<S: AsRef<str>>(
    inputs: &[S],
    config: &BuildConfig,
) -> Result<Vec<FigureReport>, FigureError> {
    let total = inputs.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut reports = Vec::with_capacity(total);
    for (index, input) in inputs.iter().enumerate() {
        let input = input.as_ref();
        if let Some(ref cb) = config.progress_callback {
            cb.on_figure_start(index, total, input);
        }

        let report = build_figure(input, config)?;
        if let Some(ref cb) = config.progress_callback {
            cb.on_figure_complete(&report);
        }
        reports.push(report);
    }

    let clean = reports.iter().filter(|r| r.is_clean()).count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, clean);
    }
    info!("batch finished: {clean}/{total} figures clean");

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_four_character_extension() {
        assert_eq!(base_name("plot.gpl").unwrap(), "plot");
        assert_eq!(base_name("figs/decay.gpl").unwrap(), "figs/decay");
        assert_eq!(base_name("a.b.gpl").unwrap(), "a.b");
    }

    #[test]
    fn base_name_rejects_other_shapes() {
        for bad in ["plot", "plot.g", "plot.tex2", ".gpl", "plotgpl"] {
            assert!(
                matches!(base_name(bad), Err(FigureError::InvalidInput { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn cleanup_suffix_order_is_fixed() {
        assert_eq!(
            CLEANUP_SUFFIXES,
            ["_tmp.tex", "_tmp.log", "_tmp.aux", ".eps", ".tex"]
        );
    }
}
