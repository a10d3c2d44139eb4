//! Declarative description of the target's command-line surface.
//!
//! The substrings, flags, and smoke source the built-in checks probe are
//! data, not code: the compiled-in [`Default`] profile describes the
//! reference target, and any field can be overridden from a YAML file
//! without touching execution logic.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source artifact materialized for the smoke-compilation check.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SmokeSource {
    /// File name to create inside the per-run temporary directory.
    #[serde(default = "default_smoke_file_name")]
    pub file_name: String,

    /// Source text to seed the file with.
    #[serde(default = "default_smoke_contents")]
    pub contents: String,
}

impl Default for SmokeSource {
    fn default() -> Self {
        Self {
            file_name: default_smoke_file_name(),
            contents: default_smoke_contents(),
        }
    }
}

/// Declarative description of the CLI surface the built-in checks probe.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TargetProfile {
    /// Display name for the target.
    #[serde(default)]
    pub name: Option<String>,

    /// Flag used to request help output.
    #[serde(default = "default_help_flag")]
    pub help_flag: String,

    /// Exit code expected from a help invocation.
    #[serde(default)]
    pub help_exit_code: i32,

    /// Substrings that must all appear in the target's help output.
    #[serde(default = "default_required_features")]
    pub required_features: Vec<String>,

    /// Flags probed for recognition, one invocation each.
    #[serde(default = "default_probed_flags")]
    pub probed_flags: Vec<String>,

    /// Source artifact for the smoke-compilation check.
    #[serde(default)]
    pub smoke_source: SmokeSource,

    /// Timeout for the smoke-compilation invocation, in seconds.
    #[serde(default = "default_smoke_timeout")]
    pub smoke_timeout_in_seconds: u64,
}

impl Default for TargetProfile {
    fn default() -> Self {
        Self {
            name: None,
            help_flag: default_help_flag(),
            help_exit_code: 0,
            required_features: default_required_features(),
            probed_flags: default_probed_flags(),
            smoke_source: SmokeSource::default(),
            smoke_timeout_in_seconds: default_smoke_timeout(),
        }
    }
}

impl TargetProfile {
    /// Loads a profile from a YAML file.
    ///
    /// Fields absent from the file fall back to the compiled-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening {}", path.to_string_lossy()))?;
        let profile = serde_yaml::from_reader(file)
            .with_context(|| format!("parsing {}", path.to_string_lossy()))?;

        Ok(profile)
    }
}

fn default_help_flag() -> String {
    String::from("--help")
}

fn default_smoke_file_name() -> String {
    String::from("smoke_test.to")
}

fn default_smoke_contents() -> String {
    String::from(
        "\ndef main():\n    print(\"Hello from Tocin!\")\n    return 0\n",
    )
}

fn default_smoke_timeout() -> u64 {
    crate::execution::DEFAULT_TIMEOUT_IN_SECONDS
}

fn default_required_features() -> Vec<String> {
    [
        "Option/Result types",
        "Traits",
        "Ownership",
        "Null safety",
        "Concurrency",
        "async/await",
        "Macro system",
        "FFI support",
        "JavaScript",
        "Python",
        "C++",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_probed_flags() -> Vec<String> {
    [
        "--dump-ir",
        "-O0",
        "-O1",
        "-O2",
        "-O3",
        "--no-ffi",
        "--no-concurrency",
        "--enable-javascript",
        "--enable-python",
        "--enable-cpp",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
