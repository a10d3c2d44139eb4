//! Suite orchestration.

use crate::checks;
use crate::config::{HarnessOptions, RunnerConfig};
use crate::reporting::{CheckOutcome, CheckResult, SuiteResults};
use crate::testcase::TestCaseRegistry;
use std::panic::AssertUnwindSafe;

/// The suite orchestrator.
///
/// Runs registered checks strictly in registration order, each behind an
/// isolating fault boundary: an error or panic escaping one check is
/// recorded against that check alone and the suite continues. Beyond
/// "iterate, isolate, record" the orchestrator holds no logic; everything
/// check-specific lives in the registry's actions.
pub struct SuiteRunner {
    config: RunnerConfig,
    options: HarnessOptions,
}

impl SuiteRunner {
    /// Creates a runner with the given configuration and options.
    pub const fn new(config: RunnerConfig, options: HarnessOptions) -> Self {
        Self { config, options }
    }

    /// Runs the built-in conformance checks.
    pub fn run(&self) -> SuiteResults {
        self.run_registry(checks::builtin_checks(&self.config))
    }

    /// Runs an explicit registry of checks.
    ///
    /// Every registered check yields exactly one result entry, whether it
    /// passed, failed, faulted, or was excluded by an operator filter.
    pub fn run_registry(&self, registry: TestCaseRegistry) -> SuiteResults {
        let mut results = SuiteResults::default();

        for case in registry.iter() {
            if !self.options.should_run_check(case.name()) {
                results.record(CheckResult {
                    name: case.name().to_string(),
                    outcome: CheckOutcome::Skipped,
                    duration: std::time::Duration::default(),
                });
                continue;
            }

            tracing::debug!(check = case.name(), "running check");

            let start_time = std::time::Instant::now();
            let outcome = match std::panic::catch_unwind(AssertUnwindSafe(|| case.run())) {
                Ok(Ok(true)) => CheckOutcome::Passed,
                Ok(Ok(false)) => CheckOutcome::Failed,
                Ok(Err(err)) => CheckOutcome::Faulted {
                    message: format!("{err:#}"),
                },
                Err(payload) => CheckOutcome::Faulted {
                    message: describe_panic(payload.as_ref()),
                },
            };

            results.record(CheckResult {
                name: case.name().to_string(),
                outcome,
                duration: start_time.elapsed(),
            });
        }

        results
    }
}

fn describe_panic(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("check panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("check panicked: {message}")
    } else {
        String::from("check panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testcase::TestCase;
    use clap::Parser;
    use std::path::PathBuf;

    fn runner_with_args(args: &[&str]) -> SuiteRunner {
        let argv: Vec<String> = std::iter::once("gauntlet")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();

        SuiteRunner::new(
            RunnerConfig::new(PathBuf::from("/nonexistent")),
            HarnessOptions::parse_from(argv),
        )
    }

    fn synthetic_registry() -> TestCaseRegistry {
        let mut registry = TestCaseRegistry::new();
        registry.register(TestCase::new("one", || Ok(true)));
        registry.register(TestCase::new("two", || Ok(true)));
        registry.register(TestCase::new("three", || Ok(true)));
        registry.register(TestCase::new("four", || Ok(true)));
        registry.register(TestCase::new("five", || {
            anyhow::bail!("synthetic fault")
        }));
        registry
    }

    #[test]
    fn a_faulting_check_never_aborts_the_suite() {
        let results = runner_with_args(&[]).run_registry(synthetic_registry());

        assert_eq!(results.total_count(), 5);
        assert_eq!(results.passed_count(), 4);
        assert_eq!(results.fail_count(), 1);
        assert_eq!(results.exit_code(), 1);

        let last = &results.entries()[4];
        assert_eq!(last.name, "five");
        match &last.outcome {
            CheckOutcome::Faulted { message } => assert!(message.contains("synthetic fault")),
            other => panic!("expected a fault, got {other:?}"),
        }
    }

    #[test]
    fn a_panicking_check_is_contained() {
        let mut registry = TestCaseRegistry::new();
        registry.register(TestCase::new("panics", || panic!("boom")));
        registry.register(TestCase::new("still runs", || Ok(true)));

        let results = runner_with_args(&[]).run_registry(registry);

        assert_eq!(results.total_count(), 2);
        assert_eq!(results.passed_count(), 1);
        match &results.entries()[0].outcome {
            CheckOutcome::Faulted { message } => assert!(message.contains("boom")),
            other => panic!("expected a fault, got {other:?}"),
        }
    }

    #[test]
    fn results_preserve_registration_order() {
        let results = runner_with_args(&[]).run_registry(synthetic_registry());

        let names: Vec<_> = results.entries().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn filtered_out_checks_are_recorded_as_skipped() {
        let results = runner_with_args(&["--exact", "two"]).run_registry(synthetic_registry());

        assert_eq!(results.total_count(), 5);
        assert_eq!(results.passed_count(), 1);
        assert_eq!(results.skip_count(), 4);
        assert_eq!(results.fail_count(), 0);
        assert_eq!(results.exit_code(), 0);
        assert_eq!(results.entries()[0].outcome, CheckOutcome::Skipped);
    }

    #[test]
    fn consecutive_runs_produce_identical_outcomes() {
        let runner = runner_with_args(&[]);

        let first = runner.run_registry(synthetic_registry());
        let second = runner.run_registry(synthetic_registry());

        let outcomes = |results: &SuiteResults| {
            results
                .entries()
                .iter()
                .map(|r| r.outcome.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(outcomes(&first), outcomes(&second));
    }
}
