//! End-to-end tests for gpl2pdf.
//!
//! Real gnuplot/ps2pdf/pdflatex are not assumed to exist on the test
//! machine. Instead each test fabricates small shell-script stand-ins in a
//! temp directory and wires them through `BuildConfig`, so the whole
//! pipeline — argument construction, error policy, finalize and cleanup —
//! runs for real while the tools themselves are deterministic.
//!
//! The stand-ins mimic the observable file behaviour of the real tools:
//! gnuplot leaves `<base>.tex` + `<base>.eps`, ps2pdf writes its third
//! argument, pdflatex turns `<base>_tmp.tex` into `<base>_tmp.pdf` plus a
//! `.log` and `.aux`. The pdflatex stand-in copies its input into the
//! "PDF", which lets tests read the generated wrapper back out of the
//! final artifact.

#![cfg(unix)]

use gpl2pdf::{build_batch, build_figure, BuildConfig, FigureError, Step};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Write an executable shell script into `dir` and return its path.
fn write_stub(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path.to_str().unwrap().to_string()
}

const GNUPLOT_BODY: &str = r#"for arg in "$@"; do last="$arg"; done
base="${last%.*}"
echo 'plot fragment' > "$base.tex"
echo '%!PS-Adobe-3.0 EPSF-3.0' > "$base.eps""#;

const PS2PDF_BODY: &str = r#"echo '%PDF-1.4 cropped' > "$3""#;

const PDFLATEX_BODY: &str = r#"base="${1%.tex}"
cp "$1" "$base.pdf"
echo 'transcript' > "$base.log"
echo 'relocs' > "$base.aux""#;

/// A config whose three tools are the standard well-behaved stand-ins.
fn stub_config(dir: &Path) -> BuildConfig {
    BuildConfig::builder()
        .gnuplot(write_stub(dir, "gnuplot-stub", GNUPLOT_BODY))
        .ps2pdf(write_stub(dir, "ps2pdf-stub", PS2PDF_BODY))
        .pdflatex(write_stub(dir, "pdflatex-stub", PDFLATEX_BODY))
        .build()
        .unwrap()
}

fn write_script(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

/// Assert that none of the intermediate artifacts for `base` survived.
fn assert_no_intermediates(dir: &Path, base: &str) {
    for leftover in [
        format!("{base}_tmp.tex"),
        format!("{base}_tmp.log"),
        format!("{base}_tmp.aux"),
        format!("{base}_tmp.pdf"),
        format!("{base}.eps"),
        format!("{base}.tex"),
    ] {
        assert!(
            !dir.join(&leftover).exists(),
            "intermediate {leftover} should have been removed"
        );
    }
}

// ── Happy path ───────────────────────────────────────────────────────────────

#[test]
fn full_pipeline_leaves_single_pdf_sized_to_the_script() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_script(
        dir.path(),
        "plot.gpl",
        "plotheight = 8\nplotwidth=4\nplot sin(x)\n",
    );
    let config = stub_config(dir.path());

    let report = build_figure(&input, &config).unwrap();

    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert_eq!(report.width, 4.0);
    assert_eq!(report.height, 8.0);

    let pdf = dir.path().join("plot.pdf");
    assert_eq!(report.output, pdf);
    assert!(pdf.exists(), "final PDF missing");

    // The pdflatex stand-in copied the wrapper into the PDF slot, so the
    // final artifact shows the geometry the wrapper was generated with.
    let wrapper = fs::read_to_string(&pdf).unwrap();
    assert!(
        wrapper.contains("paperwidth=4cm, paperheight=8cm,margin=0.0in"),
        "got: {wrapper}"
    );
    assert!(wrapper.contains("\\nonstopmode"));

    assert_no_intermediates(dir.path(), "plot");
}

#[test]
fn defaults_used_when_script_sets_no_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_script(dir.path(), "bare.gpl", "plot cos(x)\n");
    let config = stub_config(dir.path());

    let report = build_figure(&input, &config).unwrap();

    assert_eq!(report.width, 5.0);
    assert_eq!(report.height, 10.0);
    let wrapper = fs::read_to_string(dir.path().join("bare.pdf")).unwrap();
    assert!(wrapper.contains("paperwidth=5cm, paperheight=10cm"), "got: {wrapper}");
}

#[test]
fn batch_builds_every_input_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_script(dir.path(), "first.gpl", "plotwidth = 3\n");
    let second = write_script(dir.path(), "second.gpl", "plotwidth = 6\n");
    let config = stub_config(dir.path());

    let reports = build_batch(&[first.clone(), second.clone()], &config).unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].input, first);
    assert_eq!(reports[0].width, 3.0);
    assert_eq!(reports[1].input, second);
    assert_eq!(reports[1].width, 6.0);
    assert!(dir.path().join("first.pdf").exists());
    assert!(dir.path().join("second.pdf").exists());
    assert_no_intermediates(dir.path(), "first");
    assert_no_intermediates(dir.path(), "second");
}

// ── Tool invocation compatibility ────────────────────────────────────────────

#[test]
fn tool_argument_order_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_script(dir.path(), "plot.gpl", "plot sin(x)\n");
    let base = input.trim_end_matches(".gpl").to_string();

    let record = |name: &str, rest: &str| {
        let argfile = dir.path().join(format!("{name}.args"));
        write_stub(
            dir.path(),
            name,
            &format!("printf '%s\\n' \"$@\" > {}\n{rest}", argfile.display()),
        )
    };

    let config = BuildConfig::builder()
        .gnuplot(record("gnuplot-stub", GNUPLOT_BODY))
        .ps2pdf(record("ps2pdf-stub", PS2PDF_BODY))
        .pdflatex(record("pdflatex-stub", PDFLATEX_BODY))
        .build()
        .unwrap();

    build_figure(&input, &config).unwrap();

    let args = |name: &str| fs::read_to_string(dir.path().join(format!("{name}.args"))).unwrap();
    assert_eq!(
        args("gnuplot-stub"),
        format!("-e\noutfilename='{base}.tex'\n{input}\n")
    );
    assert_eq!(
        args("ps2pdf-stub"),
        format!("-dEPSCrop\n{base}.eps\n{base}.pdf\n")
    );
    assert_eq!(args("pdflatex-stub"), format!("{base}_tmp.tex\n"));
}

// ── Error policy: report-and-continue ────────────────────────────────────────

#[test]
fn converter_failure_does_not_gate_typeset_or_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_script(dir.path(), "plot.gpl", "plotheight = 2\n");

    let config = BuildConfig::builder()
        .gnuplot(write_stub(dir.path(), "gnuplot-stub", GNUPLOT_BODY))
        .ps2pdf(write_stub(
            dir.path(),
            "ps2pdf-stub",
            "echo 'GPL Ghostscript: unrecoverable error'\necho 'boom' 1>&2\nexit 9",
        ))
        .pdflatex(write_stub(dir.path(), "pdflatex-stub", PDFLATEX_BODY))
        .build()
        .unwrap();

    let report = build_figure(&input, &config).unwrap();

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.step, Step::Convert);
    assert_eq!(failure.code, Some(9));
    assert!(failure.output.contains("Ghostscript"), "got: {}", failure.output);
    assert!(failure.output.contains("boom"), "got: {}", failure.output);

    // The typeset step still ran and the final move and cleanup happened.
    assert!(dir.path().join("plot.pdf").exists());
    assert_no_intermediates(dir.path(), "plot");
}

#[test]
fn every_tool_failing_still_yields_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_script(dir.path(), "plot.gpl", "plotwidth = 1\n");

    // Each stand-in produces its files and THEN exits non-zero, so the
    // chain stays intact while every step reports a failure.
    let config = BuildConfig::builder()
        .gnuplot(write_stub(
            dir.path(),
            "gnuplot-stub",
            &format!("{GNUPLOT_BODY}\nexit 1"),
        ))
        .ps2pdf(write_stub(
            dir.path(),
            "ps2pdf-stub",
            &format!("{PS2PDF_BODY}\nexit 2"),
        ))
        .pdflatex(write_stub(
            dir.path(),
            "pdflatex-stub",
            &format!("{PDFLATEX_BODY}\nexit 3"),
        ))
        .build()
        .unwrap();

    let report = build_figure(&input, &config).unwrap();

    let steps: Vec<Step> = report.failures.iter().map(|f| f.step).collect();
    assert_eq!(steps, [Step::Render, Step::Convert, Step::Typeset]);
    assert!(dir.path().join("plot.pdf").exists());
    assert_no_intermediates(dir.path(), "plot");
}

// ── Error policy: fail fast on broken chains ─────────────────────────────────

#[test]
fn cleanup_aborts_batch_when_intermediates_missing() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_script(dir.path(), "first.gpl", "plot sin(x)\n");
    let second = write_script(dir.path(), "second.gpl", "plot cos(x)\n");

    // A renderer that exits zero without producing anything: the first
    // missing artifact surfaces at cleanup time, not before.
    let config = BuildConfig::builder()
        .gnuplot(write_stub(dir.path(), "gnuplot-stub", "exit 0"))
        .ps2pdf(write_stub(dir.path(), "ps2pdf-stub", PS2PDF_BODY))
        .pdflatex(write_stub(dir.path(), "pdflatex-stub", PDFLATEX_BODY))
        .build()
        .unwrap();

    let err = build_batch(&[first, second], &config).unwrap_err();

    match err {
        FigureError::CleanupFailed { ref path, .. } => {
            assert!(
                path.to_string_lossy().ends_with("first.eps"),
                "unexpected path: {}",
                path.display()
            );
        }
        other => panic!("expected CleanupFailed, got: {other}"),
    }

    // The batch stopped before the second input was touched.
    assert!(!dir.path().join("second.pdf").exists());
    assert!(!dir.path().join("second_tmp.tex").exists());
}

#[test]
fn unspawnable_renderer_aborts_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_script(dir.path(), "plot.gpl", "plot sin(x)\n");

    let config = BuildConfig::builder()
        .gnuplot(dir.path().join("no-such-gnuplot").to_str().unwrap())
        .ps2pdf(write_stub(dir.path(), "ps2pdf-stub", PS2PDF_BODY))
        .pdflatex(write_stub(dir.path(), "pdflatex-stub", PDFLATEX_BODY))
        .build()
        .unwrap();

    let err = build_figure(&input, &config).unwrap_err();
    assert!(matches!(err, FigureError::SpawnFailed { .. }));
}

#[test]
fn input_without_extension_aborts_before_any_tool_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path());

    let err = build_batch(&["noextension".to_string()], &config).unwrap_err();
    assert!(matches!(err, FigureError::InvalidInput { .. }));
}
