//! Configuration for figure builds.
//!
//! All build behaviour is controlled through [`BuildConfig`], built via its
//! [`BuildConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config across a batch and to see at a glance which tools a run
//! will invoke.

use crate::error::FigureError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Configuration for a figure build.
///
/// Built via [`BuildConfig::builder()`] or using
/// [`BuildConfig::default()`].
///
/// # Example
/// ```rust
/// use gpl2pdf::BuildConfig;
///
/// let config = BuildConfig::builder()
///     .gnuplot("/opt/gnuplot/bin/gnuplot")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BuildConfig {
    /// Program name or path of the gnuplot renderer. Default: `"gnuplot"`.
    pub gnuplot: String,

    /// Program name or path of the EPS→PDF converter. Default: `"ps2pdf"`.
    pub ps2pdf: String,

    /// Program name or path of the LaTeX typesetter. Default: `"pdflatex"`.
    pub pdflatex: String,

    /// Optional status callback receiving batch, figure and step events.
    /// Default: `None` (events go to `tracing` logs only).
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            gnuplot: "gnuplot".to_string(),
            ps2pdf: "ps2pdf".to_string(),
            pdflatex: "pdflatex".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("gnuplot", &self.gnuplot)
            .field("ps2pdf", &self.ps2pdf)
            .field("pdflatex", &self.pdflatex)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BuildProgressCallback>"),
            )
            .finish()
    }
}

impl BuildConfig {
    /// Create a new builder for `BuildConfig`.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BuildConfig`].
#[derive(Debug)]
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    pub fn gnuplot(mut self, program: impl Into<String>) -> Self {
        self.config.gnuplot = program.into();
        self
    }

    pub fn ps2pdf(mut self, program: impl Into<String>) -> Self {
        self.config.ps2pdf = program.into();
        self
    }

    pub fn pdflatex(mut self, program: impl Into<String>) -> Self {
        self.config.pdflatex = program.into();
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BuildConfig, FigureError> {
        let c = &self.config;
        for (name, value) in [
            ("gnuplot", &c.gnuplot),
            ("ps2pdf", &c.ps2pdf),
            ("pdflatex", &c.pdflatex),
        ] {
            if value.trim().is_empty() {
                return Err(FigureError::InvalidConfig(format!(
                    "{name} program name must not be empty"
                )));
            }
        }
        Ok(self.config)
    }
}
