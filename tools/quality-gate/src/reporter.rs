use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::check::CheckOutcome;
use crate::engine::{CheckReport, RunResult};

pub fn print_header() {
    println!(
        "{}",
        "\n=== Code Quality Checks ===\n".if_supports_color(Stdout, |s| s.bold())
    );
}

pub fn print_report(report: &CheckReport) {
    let check = &report.check;
    match &report.outcome {
        CheckOutcome::SkippedNoMatch => {}
        CheckOutcome::SkippedToolMissing { install_hint } => {
            println!(
                "{} {} - skipping \"{}\": {}",
                "\u{26a0}".if_supports_color(Stdout, |s| s.yellow()),
                check.category,
                check.description,
                format!("command '{}' is not present", check.command)
                    .if_supports_color(Stdout, |s| s.yellow()),
            );
            if let Some(hint) = install_hint {
                println!(
                    "  To install it: {}",
                    hint.if_supports_color(Stdout, |s| s.italic())
                );
            }
        }
        CheckOutcome::Passed => {
            println!(
                "{} {} - {}",
                "\u{2713}".if_supports_color(Stdout, |s| s.green()),
                check.category,
                check.description,
            );
        }
        CheckOutcome::Failed {
            output,
            matched_files,
        } => {
            print_failure(report, "", output, matched_files);
        }
        CheckOutcome::TimedOut {
            output,
            matched_files,
        } => {
            let limit = check.timeout_secs.unwrap_or_default();
            print_failure(
                report,
                &format!(" (timed out after {limit}s)"),
                output,
                matched_files,
            );
        }
    }
}

fn print_failure(report: &CheckReport, detail: &str, output: &str, matched_files: &[String]) {
    let check = &report.check;
    println!(
        "{} {} - {}{}",
        "\u{2717}".if_supports_color(Stdout, |s| s.red()),
        check.category,
        check.description,
        detail.if_supports_color(Stdout, |s| s.red()),
    );
    println!();
    if check.show_filenames {
        println!(
            "  {}",
            matched_files.join(" ").if_supports_color(Stdout, |s| s.dimmed())
        );
    }
    for line in output.lines() {
        println!("  {}", line.if_supports_color(Stdout, |s| s.red()));
    }
    println!();
}

pub fn print_summary(result: &RunResult) {
    let failed = result
        .reports
        .iter()
        .filter(|r| r.outcome.is_failure())
        .count();
    let skipped = result
        .reports
        .iter()
        .filter(|r| {
            matches!(
                r.outcome,
                CheckOutcome::SkippedNoMatch | CheckOutcome::SkippedToolMissing { .. }
            )
        })
        .count();
    let total = result.reports.len();

    println!(
        "{}",
        "\n--- Summary ---".if_supports_color(Stdout, |s| s.bold())
    );
    if result.all_passed {
        println!(
            "{}",
            format!(
                "\nAll {}/{} checks passed ({} skipped).\n",
                total - failed - skipped,
                total - skipped,
                skipped,
            )
            .if_supports_color(Stdout, |s| s.green()),
        );
    } else {
        println!(
            "{}",
            format!("\n{failed}/{total} check(s) failed.\n")
                .if_supports_color(Stdout, |s| s.red()),
        );
    }
}
