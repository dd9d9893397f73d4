//! Parameter scan: extract the plot page size from a gnuplot script.
//!
//! Figure scripts carry their intended paper size as plain gnuplot variable
//! assignments, e.g.
//!
//! ```text
//! plotheight = 8
//! plotwidth  = 4.5
//! set terminal epslatex size plotwidth cm, plotheight cm
//! ```
//!
//! The scan reads those two assignments back out so the wrapper document
//! can size its page to the plot exactly. Every other line is left to
//! gnuplot. When a variable is assigned more than once the last assignment
//! wins, matching how gnuplot itself would evaluate the script.

use crate::error::FigureError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

static RE_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*plotheight\s*=\s*(\d+(?:\.\d+)?|\.\d+)").unwrap());
static RE_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*plotwidth\s*=\s*(\d+(?:\.\d+)?|\.\d+)").unwrap());

/// Page size of the wrapper document, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PlotSize {
    /// The size used when the script assigns neither variable.
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 10.0,
        }
    }
}

/// Scan a gnuplot script for `plotheight` / `plotwidth` assignments.
///
/// Returns the defaults for any variable never assigned; the last
/// assignment wins when a variable appears more than once. Lines that do
/// not match either pattern are ignored.
pub fn scan_plot_size(path: &Path) -> Result<PlotSize, FigureError> {
    let file = File::open(path).map_err(|source| FigureError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut size = PlotSize::default();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| FigureError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(caps) = RE_HEIGHT.captures(&line) {
            size.height = parse_dimension(&caps[1])?;
            debug!("plotheight = {}", size.height);
        }
        if let Some(caps) = RE_WIDTH.captures(&line) {
            size.width = parse_dimension(&caps[1])?;
            debug!("plotwidth = {}", size.width);
        }
    }

    Ok(size)
}

fn parse_dimension(text: &str) -> Result<f64, FigureError> {
    text.parse().map_err(|source| FigureError::BadDimension {
        text: text.to_string(),
        source,
    })
}
