//! Reporting utilities for suite results.
//!
//! Rendering is side-effecting; the pass/fail totals and the process exit
//! status are pure functions of [`SuiteResults`] alone.

use crate::config::{HarnessOptions, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

/// Outcome of a single check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The check's expectations held.
    Passed,
    /// The check ran but an expectation did not hold.
    Failed,
    /// The check's action failed with an error or panic.
    Faulted {
        /// Captured fault description.
        message: String,
    },
    /// The check was excluded by an operator filter.
    Skipped,
}

impl CheckOutcome {
    /// Returns whether this outcome counts against the suite.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Faulted { .. })
    }

    /// Returns whether this outcome is a pass.
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Result of running a single check.
#[derive(Clone, Debug)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Recorded outcome.
    pub outcome: CheckOutcome,
    /// Wall-clock duration of the check.
    pub duration: Duration,
}

/// Accumulated results of one suite run, in registration order.
#[derive(Debug, Default)]
pub struct SuiteResults {
    results: Vec<CheckResult>,
}

impl SuiteResults {
    /// Appends a check result.
    pub fn record(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Recorded results in registration order.
    pub fn entries(&self) -> &[CheckResult] {
        &self.results
    }

    /// Number of checks that passed.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_pass()).count()
    }

    /// Number of checks that failed or faulted.
    pub fn fail_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.is_failure())
            .count()
    }

    /// Number of checks excluded by operator filters.
    pub fn skip_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == CheckOutcome::Skipped)
            .count()
    }

    /// Total number of recorded checks.
    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    /// Returns whether the suite as a whole succeeded.
    pub fn success(&self) -> bool {
        self.fail_count() == 0
    }

    /// Process exit code mechanically derived from the recorded outcomes.
    pub fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }

    /// Summed duration of the passing checks.
    fn passed_duration(&self) -> Duration {
        self.results
            .iter()
            .filter(|r| r.outcome.is_pass())
            .map(|r| r.duration)
            .sum()
    }
}

/// Reports suite results in the configured output format.
pub fn report_results(results: &SuiteResults, options: &HarnessOptions) -> Result<()> {
    match options.format {
        OutputFormat::Pretty => report_pretty(&mut std::io::stderr(), results, options),
        OutputFormat::Junit => report_junit(results),
        OutputFormat::Terse => write_summary(&mut std::io::stderr(), results),
    }
}

fn report_pretty<W: Write>(
    writer: &mut W,
    results: &SuiteResults,
    options: &HarnessOptions,
) -> Result<()> {
    for result in results.entries() {
        write_check_line(writer, result, options)?;
    }

    writeln!(
        writer,
        "================================================================================"
    )?;
    write_summary(writer, results)?;
    writeln!(
        writer,
        "duration of passing checks: {:?}",
        results.passed_duration()
    )?;
    writeln!(
        writer,
        "================================================================================"
    )?;

    Ok(())
}

fn write_check_line<W: Write>(
    writer: &mut W,
    result: &CheckResult,
    options: &HarnessOptions,
) -> Result<()> {
    write!(
        writer,
        "* {}: [{}]... ",
        "Check".bright_yellow(),
        result.name.italic()
    )?;

    match &result.outcome {
        CheckOutcome::Passed => writeln!(writer, "{}", "ok.".bright_green())?,
        CheckOutcome::Skipped => writeln!(writer, "{}", "skipped.".cyan())?,
        CheckOutcome::Failed => writeln!(writer, "{}", "FAILED.".bright_red())?,
        CheckOutcome::Faulted { message } => {
            writeln!(writer, "{} {message}", "FAULTED:".bright_red())?;
        }
    }

    if options.verbose && !matches!(result.outcome, CheckOutcome::Skipped) {
        writeln!(writer, "    completed in {:?}", result.duration)?;
    }

    Ok(())
}

fn write_summary<W: Write>(writer: &mut W, results: &SuiteResults) -> Result<()> {
    let fail_count = results.fail_count();
    let skip_count = results.skip_count();

    let formatted_fail_count = if fail_count > 0 {
        fail_count.to_string().red()
    } else {
        fail_count.to_string().green()
    };

    let formatted_skip_count = if skip_count > 0 {
        skip_count.to_string().cyan()
    } else {
        skip_count.to_string().green()
    };

    writeln!(
        writer,
        "{} check(s) ran: {} passed, {} failed, {} skipped.",
        results.total_count() - skip_count,
        results.passed_count().to_string().green(),
        formatted_fail_count,
        formatted_skip_count,
    )?;

    Ok(())
}

fn report_junit(results: &SuiteResults) -> Result<()> {
    let mut report = junit_report::Report::new();
    let mut suite = junit_report::TestSuite::new("conformance");

    for result in results.entries() {
        let test_case = match &result.outcome {
            CheckOutcome::Passed => {
                junit_report::TestCase::success(result.name.as_str(), result.duration.try_into()?)
            }
            CheckOutcome::Skipped => junit_report::TestCase::skipped(result.name.as_str()),
            CheckOutcome::Failed => junit_report::TestCase::failure(
                result.name.as_str(),
                result.duration.try_into()?,
                "expectation",
                "failed",
            ),
            CheckOutcome::Faulted { message } => junit_report::TestCase::error(
                result.name.as_str(),
                result.duration.try_into()?,
                "fault",
                strip_ansi_escapes::strip_str(message).as_str(),
            ),
        };

        suite.add_testcase(test_case);
    }

    report.add_testsuite(suite);
    report.write_xml(std::io::stdout())?;
    writeln!(std::io::stdout())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn results_with(outcomes: &[CheckOutcome]) -> SuiteResults {
        let mut results = SuiteResults::default();
        for (i, outcome) in outcomes.iter().enumerate() {
            results.record(CheckResult {
                name: format!("check-{i}"),
                outcome: outcome.clone(),
                duration: Duration::from_millis(10),
            });
        }
        results
    }

    #[test]
    fn totals_are_derived_from_outcomes_alone() {
        let results = results_with(&[
            CheckOutcome::Passed,
            CheckOutcome::Passed,
            CheckOutcome::Failed,
            CheckOutcome::Faulted {
                message: String::from("boom"),
            },
            CheckOutcome::Skipped,
        ]);

        assert_eq!(results.total_count(), 5);
        assert_eq!(results.passed_count(), 2);
        assert_eq!(results.fail_count(), 2);
        assert_eq!(results.skip_count(), 1);
        assert!(!results.success());
        assert_eq!(results.exit_code(), 1);
    }

    #[test]
    fn all_passed_maps_to_a_successful_exit_status() {
        let results = results_with(&[CheckOutcome::Passed, CheckOutcome::Passed]);

        assert!(results.success());
        assert_eq!(results.exit_code(), 0);
    }

    #[test]
    fn an_empty_suite_is_vacuously_successful() {
        let results = SuiteResults::default();

        assert_eq!(results.exit_code(), 0);
    }

    #[test]
    fn pretty_report_renders_every_check_in_order() -> Result<()> {
        let options = HarnessOptions::parse_from(["gauntlet"]);
        let results = results_with(&[
            CheckOutcome::Passed,
            CheckOutcome::Failed,
            CheckOutcome::Faulted {
                message: String::from("target binary not found"),
            },
        ]);

        let mut buffer: Vec<u8> = vec![];
        report_pretty(&mut buffer, &results, &options)?;
        let rendered = String::from_utf8(buffer)?;

        let first = rendered.find("check-0").unwrap();
        let second = rendered.find("check-1").unwrap();
        let third = rendered.find("check-2").unwrap();
        assert!(first < second && second < third);
        assert!(rendered.contains("target binary not found"));
        assert!(rendered.contains("check(s) ran"));

        Ok(())
    }
}
