use std::time::Duration;

use crate::config::{CheckDefinition, Classification, FILES_PLACEHOLDER};
use crate::invoke::{CommandCall, CommandResult, CommandRunner};
use crate::matcher::PathFilter;
use crate::probe;

/// Per-check classification after filtering and invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No candidate file matched the check's patterns. Nothing was
    /// probed or invoked.
    SkippedNoMatch,
    /// The external tool is not installed.
    SkippedToolMissing { install_hint: Option<String> },
    Passed,
    Failed {
        output: String,
        matched_files: Vec<String>,
    },
    /// An invocation outlived the check's timeout and was killed.
    TimedOut {
        output: String,
        matched_files: Vec<String>,
    },
}

impl CheckOutcome {
    /// Only failures count against the run; skipped checks never do.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CheckOutcome::Failed { .. } | CheckOutcome::TimedOut { .. }
        )
    }
}

/// Run one check against the candidate list: filter, probe, invoke,
/// classify. Never returns an error; anything that goes wrong with the
/// tool is folded into the outcome so the orchestration loop survives.
pub fn run_check(
    check: &CheckDefinition,
    filter: &PathFilter,
    candidates: &[String],
    runner: &dyn CommandRunner,
) -> CheckOutcome {
    let matched = filter.filter(candidates);
    if matched.is_empty() {
        return CheckOutcome::SkippedNoMatch;
    }

    if !probe::tool_available(&check.command) {
        return CheckOutcome::SkippedToolMissing {
            install_hint: check.install_hint.clone(),
        };
    }

    let timeout = check.timeout_secs.map(Duration::from_secs);
    let mut results = Vec::new();
    if check.batch {
        results.push(runner.run(build_call(check, &matched, timeout)));
    } else {
        // Every file is attempted even after a failure; the point is to
        // report all violations, not just the first.
        for file in &matched {
            results.push(runner.run(build_call(check, std::slice::from_ref(file), timeout)));
        }
    }

    classify(check, matched, &results)
}

/// Expand the check's argument template for the given files. The
/// `"{files}"` element becomes one argv entry per path; everything else
/// is passed through verbatim.
fn build_call(check: &CheckDefinition, files: &[String], timeout: Option<Duration>) -> CommandCall {
    let mut args = Vec::with_capacity(check.args.len() + files.len());
    for arg in &check.args {
        if arg == FILES_PLACEHOLDER {
            args.extend(files.iter().cloned());
        } else {
            args.push(arg.clone());
        }
    }
    CommandCall::new(check.command.clone(), args).with_timeout(timeout)
}

fn classify(
    check: &CheckDefinition,
    matched_files: Vec<String>,
    results: &[CommandResult],
) -> CheckOutcome {
    let output: String = results.iter().map(|r| r.output.as_str()).collect();

    if results.iter().any(|r| r.timed_out) {
        return CheckOutcome::TimedOut {
            output,
            matched_files,
        };
    }

    let failed = match check.classification {
        Classification::Output => !output.is_empty(),
        Classification::ExitStatus => results.iter().any(|r| !r.success()),
    };

    if failed {
        CheckOutcome::Failed {
            output,
            matched_files,
        }
    } else {
        CheckOutcome::Passed
    }
}
