use crate::check::{run_check, CheckOutcome};
use crate::config::{CheckDefinition, ConfigError};
use crate::invoke::CommandRunner;
use crate::matcher::PathFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub check: CheckDefinition,
    pub outcome: CheckOutcome,
}

/// One run's worth of outcomes, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub reports: Vec<CheckReport>,
    /// False iff at least one check failed or timed out. Skipped checks
    /// never count against the run.
    pub all_passed: bool,
}

/// Run every check against the shared candidate list, strictly in
/// declaration order. `on_report` fires as each check completes so
/// results stream to the terminal; no check's misbehavior aborts the
/// loop. The only hard error is a bad pattern, caught up front before
/// any tool runs.
pub fn run_all<F>(
    checks: &[CheckDefinition],
    candidates: &[String],
    runner: &dyn CommandRunner,
    mut on_report: F,
) -> Result<RunResult, ConfigError>
where
    F: FnMut(&CheckReport),
{
    let filters = checks
        .iter()
        .map(PathFilter::for_check)
        .collect::<Result<Vec<_>, _>>()?;

    let mut reports = Vec::with_capacity(checks.len());
    for (check, filter) in checks.iter().zip(&filters) {
        let outcome = run_check(check, filter, candidates, runner);
        let report = CheckReport {
            check: check.clone(),
            outcome,
        };
        on_report(&report);
        reports.push(report);
    }

    let all_passed = reports.iter().all(|r| !r.outcome.is_failure());
    Ok(RunResult {
        reports,
        all_passed,
    })
}
