//! Conformance harness library for black-box testing of compiler-like
//! command-line tools.
//!
//! The harness treats the target executable as opaque: it drives the
//! target's CLI with a fixed, ordered sequence of process invocations,
//! asserts on exit codes and captured output text, and folds the per-check
//! verdicts into one aggregate summary and process exit status.
//!
//! Three guarantees shape the design:
//!
//! 1. **Partial-failure isolation**: each check runs behind a fault boundary,
//!    so one broken check never aborts the run.
//! 2. **Bounded invocations**: every wait on the target is timeout-bounded,
//!    and temporary artifacts a check creates are removed on every exit path.
//! 3. **Deterministic verdicts**: the exit status is a pure function of the
//!    accumulated results, computed separately from any rendering.

mod checks;
mod config;
mod execution;
mod matching;
mod profile;
mod reporting;
mod runner;
mod testcase;

pub use checks::builtin_checks;
pub use config::{DEFAULT_TARGET_PATH, HarnessOptions, OutputFormat, RunnerConfig};
pub use execution::{
    DEFAULT_TIMEOUT_IN_SECONDS, Invocation, TIMED_OUT_EXIT_CODE, run_target,
};
pub use matching::{
    REJECTION_MARKERS, exit_code_matches, find_substrings, flag_rejected, missing_substrings,
};
pub use profile::{SmokeSource, TargetProfile};
pub use reporting::{CheckOutcome, CheckResult, SuiteResults, report_results};
pub use runner::SuiteRunner;
pub use testcase::{CheckFn, TestCase, TestCaseRegistry};
