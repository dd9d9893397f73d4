//! CLI binary for gpl2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `BuildConfig` and renders progress events.

use anyhow::{Context, Result};
use clap::Parser;
use gpl2pdf::{
    build_batch, BuildConfig, BuildProgressCallback, FigureReport, ProgressCallback, Step,
    StepFailure,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar tick per figure, per-step messages,
/// and tool output printed through the bar so lines never tear.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl BuildProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:30.green/238}] {pos}/{len} figures  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Building");
    }

    fn on_figure_start(&self, index: usize, total: usize, input: &str) {
        self.bar.println(format!(
            "{} {} {}",
            cyan("◆"),
            bold(input),
            dim(&format!("[{}/{}]", index + 1, total))
        ));
        self.bar.set_message(input.to_string());
    }

    fn on_plot_size(&self, width: f64, height: f64) {
        self.bar
            .println(format!("    {}", dim(&format!("page {width}cm × {height}cm"))));
    }

    fn on_step_start(&self, step: Step) {
        self.bar.set_message(step.to_string());
    }

    fn on_step_failed(&self, failure: &StepFailure) {
        self.bar
            .println(format!("  {} {}", red("✗"), red(&failure.to_string())));
        for line in failure.output.lines() {
            self.bar.println(format!("      {}", dim(line)));
        }
    }

    fn on_figure_complete(&self, report: &FigureReport) {
        self.bar.println(format!(
            "  {} {}  {}",
            green("✓"),
            report.output.display(),
            dim(&format!("{:.1}s", report.duration_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total: usize, clean: usize) {
        let dirty = total.saturating_sub(clean);
        self.bar.finish_and_clear();

        if dirty == 0 {
            eprintln!(
                "{} {} figure(s) built — everything finished",
                green("✔"),
                bold(&total.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} figure(s) built cleanly  ({} with step failures)",
                cyan("⚠"),
                bold(&clean.to_string()),
                total,
                red(&dirty.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Single figure
  gpl2pdf plot.gpl

  # Batch, processed in the given order
  gpl2pdf fig1.gpl fig2.gpl fig3.gpl

  # Tools from non-standard locations
  gpl2pdf --gnuplot /opt/gnuplot/bin/gnuplot plot.gpl

  # Machine-readable build reports
  gpl2pdf --json plot.gpl > reports.json

PLOT SIZE:
  The script may set the output page size in centimetres; the last
  assignment wins, and missing assignments use the defaults:

    plotheight = 10
    plotwidth  = 5

EXTERNAL TOOLS:
  gnuplot    renders <base>.tex + <base>.eps from the script
  ps2pdf     converts <base>.eps to a content-cropped <base>.pdf
  pdflatex   typesets the generated wrapper into the final page

  A tool exiting non-zero is reported and the build continues; only a
  tool that cannot be spawned, or a missing intermediate file at the
  final move/cleanup, aborts the batch.

ENVIRONMENT VARIABLES:
  GPL2PDF_GNUPLOT    Override the gnuplot program
  GPL2PDF_PS2PDF     Override the ps2pdf program
  GPL2PDF_PDFLATEX   Override the pdflatex program
"#;

/// Turn gnuplot scripts into cropped PDF figures.
#[derive(Parser, Debug)]
#[command(
    name = "gpl2pdf",
    version,
    about = "Turn gnuplot scripts into cropped PDF figures",
    long_about = "Turn gnuplot scripts into cropped PDF figures by chaining gnuplot, ps2pdf and \
pdflatex, then removing every intermediate artifact. Each input leaves exactly one file behind: \
<base>.pdf.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// gnuplot script paths; each must end in a 4-character extension (e.g. .gpl).
    #[arg(required = true)]
    inputs: Vec<String>,

    /// gnuplot program name or path.
    #[arg(long, env = "GPL2PDF_GNUPLOT", default_value = "gnuplot")]
    gnuplot: String,

    /// ps2pdf program name or path.
    #[arg(long, env = "GPL2PDF_PS2PDF", default_value = "ps2pdf")]
    ps2pdf: String,

    /// pdflatex program name or path.
    #[arg(long, env = "GPL2PDF_PDFLATEX", default_value = "pdflatex")]
    pdflatex: String,

    /// Print build reports as JSON on stdout instead of the progress display.
    #[arg(long, env = "GPL2PDF_JSON")]
    json: bool,

    /// Disable the progress display.
    #[arg(long, env = "GPL2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "GPL2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "GPL2PDF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress display is active;
    // the callback renders all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = BuildConfig::builder()
        .gnuplot(cli.gnuplot.as_str())
        .ps2pdf(cli.ps2pdf.as_str())
        .pdflatex(cli.pdflatex.as_str());

    if show_progress {
        let cb = CliProgressCallback::new();
        builder = builder.progress_callback(cb as ProgressCallback);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run the batch ────────────────────────────────────────────────────
    let reports = build_batch(&cli.inputs, &config).context("Figure build aborted")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialise reports")?
        );
    } else if !show_progress && !cli.quiet {
        // Plain summary when the progress callback is disabled.
        for report in &reports {
            eprintln!(
                "{} → {}  ({} step failure(s), {}ms)",
                report.input,
                report.output.display(),
                report.failures.len(),
                report.duration_ms,
            );
        }
        eprintln!("{} figure(s) built — everything finished", reports.len());
    }

    Ok(())
}
