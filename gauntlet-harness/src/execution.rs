//! Execution logic for running bounded target invocations.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// Default timeout for target invocations in seconds.
pub const DEFAULT_TIMEOUT_IN_SECONDS: u64 = 10;

/// Sentinel exit code recorded when an invocation hits its timeout.
///
/// Real processes report codes in a small non-negative range, so this value
/// can never collide with one the target actually produced.
pub const TIMED_OUT_EXIT_CODE: i32 = i32::MIN;

/// Structured record of a single target invocation.
///
/// Immutable once returned by [`run_target`].
#[derive(Clone, Debug)]
pub struct Invocation {
    /// The full command line that ran: program followed by its arguments.
    pub command: Vec<String>,
    /// The timeout bound that applied to the run.
    pub timeout: Duration,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code of the process, or [`TIMED_OUT_EXIT_CODE`] on timeout.
    pub exit_code: i32,
    /// Wall-clock duration of the run.
    pub duration: Duration,
    /// Whether the process was forcibly terminated on timeout.
    pub timed_out: bool,
}

impl Invocation {
    /// Returns whether the process ran to completion, i.e. was not timed out.
    pub const fn completed(&self) -> bool {
        !self.timed_out
    }
}

/// Runs the target with the given argument vector, blocking until the process
/// exits or the timeout elapses.
///
/// On normal exit the record carries the exit code and the full captured
/// stdout/stderr as text. On timeout the child is killed and the record
/// carries [`TIMED_OUT_EXIT_CODE`] with the `timed_out` flag set.
///
/// A target that could not be launched at all (missing binary, permission
/// problems) surfaces as an `Err`, a harness-level condition distinct from
/// any failure the target itself reports. Callers can therefore tell "target
/// missing" apart from "target ran and failed".
pub fn run_target(program: &Path, args: &[String], timeout: Duration) -> Result<Invocation> {
    let command: Vec<String> = std::iter::once(program.to_string_lossy().to_string())
        .chain(args.iter().cloned())
        .collect();

    let mut cmd = std::process::Command::new(program);
    cmd.args(args);

    // Pin the locale so the target's diagnostic text is stable across systems.
    cmd.env("LC_ALL", "C");

    tracing::debug!(command = ?command, ?timeout, "invoking target");

    let mut target_cmd = assert_cmd::Command::from_std(cmd);
    target_cmd.timeout(timeout);

    let start_time = std::time::Instant::now();
    match target_cmd.output() {
        Ok(output) => {
            let duration = start_time.elapsed();

            Ok(Invocation {
                command,
                timeout,
                stdout: String::from_utf8_lossy(output.stdout.as_slice()).to_string(),
                stderr: String::from_utf8_lossy(output.stderr.as_slice()).to_string(),
                exit_code: output.status.code().unwrap_or(-1),
                duration,
                timed_out: false,
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::TimedOut => {
            let duration = start_time.elapsed();
            tracing::debug!(command = ?command, "target invocation timed out");

            Ok(Invocation {
                command,
                timeout,
                stdout: String::new(),
                stderr: String::new(),
                exit_code: TIMED_OUT_EXIT_CODE,
                duration,
                timed_out: true,
            })
        }
        Err(err) => Err(err).with_context(|| {
            format!("failed to launch target {}", program.to_string_lossy())
        }),
    }
}
