//! Wrapper generation: the LaTeX document that carries the rendered plot.
//!
//! gnuplot's LaTeX terminals emit a fragment meant to be `\input` by a
//! surrounding document. The wrapper generated here is that document: a
//! page sized exactly to the scanned plot dimensions with zero margin, so
//! the typeset PDF *is* the figure with nothing around it. `\nonstopmode`
//! comes first so a LaTeX error never stops the batch at an interactive
//! prompt.
//!
//! Centralising the template in one module keeps it unit-testable without
//! running any of the external tools.

use crate::error::FigureError;
use crate::pipeline::params::PlotSize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Render the wrapper document for `<base>.tex` at the given page size.
///
/// Dimensions use plain `Display` formatting, so whole numbers come out
/// bare (`paperwidth=4cm`, not `4.0cm`). The base name is interpolated
/// verbatim into `\input{…}` — it names a file, so no LaTeX escaping is
/// applied.
pub fn wrapper_document(base: &str, size: &PlotSize) -> String {
    format!(
        "\\nonstopmode\n\
         \\documentclass{{article}}\n\
         \\usepackage{{graphicx}}\n\
         \\usepackage{{nopageno}}\n\
         \\usepackage{{txfonts}}\n\
         \\usepackage[usenames]{{color}}\n\
         \\usepackage{{epstopdf}}\n\
         \\usepackage[paperwidth={w}cm, paperheight={h}cm,margin=0.0in]{{geometry}}\n\
         \\begin{{document}}\n\
         \\begin{{center}}\n\
         \\input{{{base}.tex}}\n\
         \\end{{center}}\n\
         \\end{{document}}\n",
        w = size.width,
        h = size.height,
    )
}

/// Write the wrapper document to `<base>_tmp.tex`.
pub fn write_wrapper(base: &str, size: &PlotSize) -> Result<PathBuf, FigureError> {
    let path = PathBuf::from(format!("{base}_tmp.tex"));
    fs::write(&path, wrapper_document(base, size)).map_err(|source| {
        FigureError::WrapperWrite {
            path: path.clone(),
            source,
        }
    })?;
    debug!("wrote wrapper document {}", path.display());
    Ok(path)
}
