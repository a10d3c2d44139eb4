//! Pure matching functions over captured target output.
//!
//! Everything here is stateless and decoupled from process invocation, so
//! the matchers can be exercised with synthetic strings.

use crate::execution::Invocation;

/// Stderr fragments indicating the target rejected a command-line flag.
///
/// Scanned case-insensitively by [`flag_rejected`].
pub const REJECTION_MARKERS: &[&str] = &["unknown option", "unrecognized"];

/// Returns whether the invocation completed with exactly the expected exit
/// code. A timed-out invocation never matches.
pub fn exit_code_matches(invocation: &Invocation, expected: i32) -> bool {
    invocation.completed() && invocation.exit_code == expected
}

/// Returns the subset of `required` substrings present in `haystack`.
///
/// Matching is case-sensitive.
pub fn find_substrings<'a>(haystack: &str, required: &'a [String]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|needle| haystack.contains(needle.as_str()))
        .map(String::as_str)
        .collect()
}

/// Returns the `required` substrings absent from `haystack`.
///
/// The complement of [`find_substrings`]; a substring-presence check succeeds
/// iff this is empty.
pub fn missing_substrings<'a>(haystack: &str, required: &'a [String]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|needle| !haystack.contains(needle.as_str()))
        .map(String::as_str)
        .collect()
}

/// Returns whether `stderr` carries any rejection marker, scanning
/// case-insensitively.
///
/// Deliberately independent of the invocation's exit code: a recognized flag
/// may still fail for unrelated reasons, so absence of rejection language is
/// the signal, not success of the underlying operation.
pub fn flag_rejected(stderr: &str) -> bool {
    let lowered = stderr.to_lowercase();
    REJECTION_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn required() -> Vec<String> {
        vec![
            String::from("Traits"),
            String::from("Ownership"),
            String::from("async/await"),
        ]
    }

    #[test]
    fn finds_full_required_set() {
        let help = "Features:\n  Traits\n  Ownership\n  async/await\n";
        let required = required();
        let found = find_substrings(help, &required);

        assert_eq!(found, vec!["Traits", "Ownership", "async/await"]);
        assert!(missing_substrings(help, &required).is_empty());
    }

    #[test]
    fn reports_each_missing_substring() {
        let help = "Features:\n  Traits\n  async/await\n";

        assert_eq!(missing_substrings(help, &required()), vec!["Ownership"]);
    }

    #[test]
    fn substring_matching_is_case_sensitive() {
        let help = "features: traits, ownership, async/await";

        let required = required();
        let missing = missing_substrings(help, &required);
        assert_eq!(missing, vec!["Traits", "Ownership"]);
    }

    #[test]
    fn rejection_markers_match_case_insensitively() {
        assert!(flag_rejected("error: Unknown Option '--dump-ir'"));
        assert!(flag_rejected("UNRECOGNIZED argument"));
        assert!(flag_rejected("warning: unrecognized target triple"));
    }

    #[test]
    fn clean_stderr_is_not_a_rejection() {
        assert!(!flag_rejected(""));
        assert!(!flag_rejected("error: no input files"));
        assert!(!flag_rejected("fatal: linker exited with status 1"));
    }

    #[test]
    fn exit_code_never_matches_a_timed_out_invocation() {
        let invocation = Invocation {
            command: vec![String::from("target")],
            timeout: std::time::Duration::from_secs(1),
            stdout: String::new(),
            stderr: String::new(),
            exit_code: crate::execution::TIMED_OUT_EXIT_CODE,
            duration: std::time::Duration::from_secs(1),
            timed_out: true,
        };

        assert!(!exit_code_matches(
            &invocation,
            crate::execution::TIMED_OUT_EXIT_CODE
        ));
    }
}
