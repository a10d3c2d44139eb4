//! Configuration types for the conformance harness.

use crate::execution;
use crate::profile::TargetProfile;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the target executable, relative to the working
/// directory.
pub const DEFAULT_TARGET_PATH: &str = "./build/tocin";

/// Configuration for a suite run.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Path to the target executable under test.
    pub target_path: PathBuf,

    /// Declarative description of the CLI surface to probe.
    pub profile: TargetProfile,

    /// Timeout applied to ordinary probe invocations.
    pub invocation_timeout: Duration,
}

impl RunnerConfig {
    /// Creates a runner config for the given target with default values.
    pub fn new(target_path: PathBuf) -> Self {
        Self {
            target_path,
            profile: TargetProfile::default(),
            invocation_timeout: Duration::from_secs(execution::DEFAULT_TIMEOUT_IN_SECONDS),
        }
    }

    /// Sets the target profile.
    #[must_use]
    pub fn with_profile(mut self, profile: TargetProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the timeout for ordinary probe invocations.
    #[must_use]
    pub const fn with_invocation_timeout(mut self, timeout: Duration) -> Self {
        self.invocation_timeout = timeout;
        self
    }

    /// Timeout bound for the smoke-compilation invocation.
    pub const fn smoke_timeout(&self) -> Duration {
        Duration::from_secs(self.profile.smoke_timeout_in_seconds)
    }
}

/// Output format for suite results.
#[derive(Clone, Copy, Default, clap::ValueEnum, Debug)]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// `JUnit` XML format.
    Junit,
    /// Summary line only.
    Terse,
}

/// Command-line options for the conformance harness.
#[derive(Clone, Parser, Debug)]
#[clap(version, about)]
pub struct HarnessOptions {
    /// Path to the target executable under test.
    #[clap(long = "target", default_value = DEFAULT_TARGET_PATH, env = "GAUNTLET_TARGET")]
    pub target_path: PathBuf,

    /// Optional YAML profile describing the target's CLI surface.
    #[clap(long = "profile", env = "GAUNTLET_PROFILE")]
    pub profile_path: Option<PathBuf>,

    /// Output format for suite results.
    #[clap(long = "format", default_value = "pretty")]
    pub format: OutputFormat,

    /// Timeout for target invocations, in seconds.
    #[clap(long = "timeout")]
    pub timeout_in_seconds: Option<u64>,

    /// Display details for passing checks as well.
    #[clap(short = 'v', long = "verbose", env = "GAUNTLET_VERBOSE")]
    pub verbose: bool,

    /// List registered checks without running them.
    #[clap(long = "list")]
    pub list_checks_only: bool,

    /// Exactly match filters (not just substring match).
    #[clap(long = "exact")]
    pub exact_match: bool,

    /// Patterns for checks to be excluded.
    #[clap(long = "skip")]
    pub exclude_filters: Vec<String>,

    /// Patterns for checks to be included.
    pub include_filters: Vec<String>,
}

impl HarnessOptions {
    /// Resolves these options into a runner configuration, loading the
    /// profile file if one was given.
    pub fn to_runner_config(&self) -> Result<RunnerConfig> {
        let mut profile = match &self.profile_path {
            Some(path) => TargetProfile::load(path)?,
            None => TargetProfile::default(),
        };

        let mut config = RunnerConfig::new(self.target_path.clone());

        if let Some(secs) = self.timeout_in_seconds {
            config.invocation_timeout = Duration::from_secs(secs);
            profile.smoke_timeout_in_seconds = secs;
        }

        config.profile = profile;

        Ok(config)
    }

    /// Returns whether a check should run based on include/exclude filters.
    pub fn should_run_check(&self, name: &str) -> bool {
        if self.include_filters.is_empty() && self.exclude_filters.is_empty() {
            return true;
        }

        // If any include filters were given, then we are in opt-in mode.
        if !self.include_filters.is_empty() && !self.matches_filters(name, &self.include_filters) {
            return false;
        }

        // In all cases, exclude filters may be used to exclude checks.
        if !self.exclude_filters.is_empty() && self.matches_filters(name, &self.exclude_filters) {
            return false;
        }

        true
    }

    fn matches_filters(&self, name: &str, filters: &[String]) -> bool {
        if self.exact_match {
            filters.iter().any(|f| f == name)
        } else {
            filters.iter().any(|filter| name.contains(filter))
        }
    }
}
