//! Subprocess invocation shared by the render, convert and typeset steps.
//!
//! Tools are spawned with structured argument lists via
//! [`std::process::Command`] — never through a shell — so filenames with
//! spaces or metacharacters reach the tool exactly as written. Invocations
//! are synchronous and attempted exactly once.
//!
//! A non-zero exit is *not* an `Err`: it comes back as `Ok(Some(StepFailure))`
//! carrying the exit code and captured output, and the caller records it and
//! moves on. Only failing to start the process at all is fatal.

use crate::error::{FigureError, StepFailure};
use crate::report::Step;
use std::process::Command;
use tracing::debug;

/// Run one external tool to completion and capture its output.
///
/// # Returns
/// * `Ok(None)` — the tool exited zero.
/// * `Ok(Some(failure))` — the tool exited non-zero (or died to a signal);
///   `failure.output` holds captured stdout followed by stderr.
/// * `Err(…)` — the process could not be spawned.
pub fn run_tool(step: Step, program: &str, args: &[String]) -> Result<Option<StepFailure>, FigureError> {
    debug!("running {program} {}", args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| FigureError::SpawnFailed {
            tool: program.to_string(),
            source,
        })?;

    if output.status.success() {
        debug!("{step} step finished");
        return Ok(None);
    }

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(Some(StepFailure {
        step,
        code: output.status.code(),
        output: combined,
    }))
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Result<Option<StepFailure>, FigureError> {
        run_tool(Step::Render, "sh", &["-c".to_string(), script.to_string()])
    }

    #[test]
    fn zero_exit_is_no_failure() {
        assert!(sh("exit 0").unwrap().is_none());
    }

    #[test]
    fn nonzero_exit_captures_code_and_both_streams() {
        let failure = sh("echo to-stdout; echo to-stderr 1>&2; exit 3")
            .unwrap()
            .expect("should be a failure");
        assert_eq!(failure.step, Step::Render);
        assert_eq!(failure.code, Some(3));
        assert!(failure.output.contains("to-stdout"), "got: {}", failure.output);
        assert!(failure.output.contains("to-stderr"), "got: {}", failure.output);
    }

    #[test]
    fn unspawnable_program_is_fatal() {
        let err = run_tool(Step::Convert, "gpl2pdf-no-such-tool", &[]).unwrap_err();
        assert!(matches!(err, FigureError::SpawnFailed { .. }));
        assert!(err.to_string().contains("gpl2pdf-no-such-tool"));
    }
}
