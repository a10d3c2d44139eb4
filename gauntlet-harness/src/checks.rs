//! Built-in conformance checks for compiler-like targets.
//!
//! Each check is a self-contained action composed from the command runner
//! and the pure matchers; the orchestrator holds no check-specific logic.

use crate::config::RunnerConfig;
use crate::execution::{self, Invocation};
use crate::matching;
use crate::testcase::{TestCase, TestCaseRegistry};
use anyhow::{Context, Result};
use assert_fs::fixture::{FileWriteStr, PathChild};

/// Builds the registry of built-in checks for the given configuration.
///
/// Registration order is the order the checks run and report in.
pub fn builtin_checks(config: &RunnerConfig) -> TestCaseRegistry {
    let mut registry = TestCaseRegistry::new();

    let cfg = config.clone();
    registry.register(TestCase::new("Binary Existence", move || {
        binary_existence(&cfg)
    }));

    let cfg = config.clone();
    registry.register(TestCase::new("Help Output", move || help_output(&cfg)));

    let cfg = config.clone();
    registry.register(TestCase::new("Feature Advertisement", move || {
        feature_advertisement(&cfg)
    }));

    let cfg = config.clone();
    registry.register(TestCase::new("Compilation Flags", move || {
        compilation_flags(&cfg)
    }));

    let cfg = config.clone();
    registry.register(TestCase::new("Simple Compilation", move || {
        simple_compilation(&cfg)
    }));

    registry
}

/// Verifies the target path exists and is executable, without invoking it.
fn binary_existence(config: &RunnerConfig) -> Result<bool> {
    let path = &config.target_path;

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("target binary not found at {}", path.to_string_lossy()))?;

    if !metadata.is_file() {
        anyhow::bail!("target path {} is not a regular file", path.to_string_lossy());
    }

    if !is_executable(&metadata) {
        anyhow::bail!(
            "target binary at {} is not executable",
            path.to_string_lossy()
        );
    }

    Ok(true)
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

/// Invokes the target with the help flag and expects the configured exit
/// code.
fn help_output(config: &RunnerConfig) -> Result<bool> {
    let invocation = run_with_help_flag(config)?;

    Ok(matching::exit_code_matches(
        &invocation,
        config.profile.help_exit_code,
    ))
}

/// Checks that the target's help output advertises every required feature.
fn feature_advertisement(config: &RunnerConfig) -> Result<bool> {
    let invocation = run_with_help_flag(config)?;
    let missing =
        matching::missing_substrings(&invocation.stdout, &config.profile.required_features);

    for feature in &missing {
        tracing::warn!(%feature, "feature not advertised in help output");
    }

    Ok(missing.is_empty())
}

/// Probes every configured flag; a flag counts as recognized iff the target
/// emits no rejection marker on stderr, regardless of how the invocation
/// otherwise ends.
fn compilation_flags(config: &RunnerConfig) -> Result<bool> {
    let mut all_recognized = true;

    for flag in &config.profile.probed_flags {
        let invocation = execution::run_target(
            &config.target_path,
            std::slice::from_ref(flag),
            config.invocation_timeout,
        )?;

        if matching::flag_rejected(&invocation.stderr) {
            tracing::warn!(%flag, "target rejected flag");
            all_recognized = false;
        } else {
            tracing::debug!(%flag, "flag recognized");
        }
    }

    Ok(all_recognized)
}

/// Compiles a minimal source file with a bounded timeout.
///
/// Any completion counts as a pass, including a nonzero or crash-like exit:
/// the check guards against hangs, not against target-reported failures.
fn simple_compilation(config: &RunnerConfig) -> Result<bool> {
    // Dropping the TempDir removes the artifact on every exit path out of
    // this function, including the timeout path.
    let temp_dir = assert_fs::TempDir::new()?;
    let source = temp_dir.child(config.profile.smoke_source.file_name.as_str());
    source.write_str(config.profile.smoke_source.contents.as_str())?;

    let source_path = source.path().to_string_lossy().to_string();
    let invocation = execution::run_target(
        &config.target_path,
        std::slice::from_ref(&source_path),
        config.smoke_timeout(),
    )?;

    if invocation.timed_out {
        tracing::warn!(timeout = ?invocation.timeout, "smoke compilation exceeded its bound");
        return Ok(false);
    }

    tracing::debug!(
        exit_code = invocation.exit_code,
        "smoke compilation completed"
    );

    Ok(true)
}

fn run_with_help_flag(config: &RunnerConfig) -> Result<Invocation> {
    execution::run_target(
        &config.target_path,
        std::slice::from_ref(&config.profile.help_flag),
        config.invocation_timeout,
    )
}
