// src/exec/classify.rs

//! Turn a captured `(exit code, stdout, stderr)` tuple into an
//! [`ExecutionResult`].
//!
//! The reboot-required flag is a heuristic over free-form tool output and is
//! allowed to be wrong in both directions. It only knows the English phrasing;
//! localized output is not recognised.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ExecutionResult;

/// Exit code Chocolatey (and MSI) use for "succeeded, reboot required".
pub const REBOOT_REQUIRED_EXIT_CODE: i32 = 3010;

/// Exit code reported when the process produced none (killed, signalled).
pub const UNOBSERVED_EXIT_CODE: i32 = 1;

static REBOOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)3010|reboot required").expect("reboot pattern is a valid regex")
});

/// Pure classification. Same inputs, same result.
pub fn classify(exit_code: Option<i32>, stdout: String, stderr: String) -> ExecutionResult {
    let success = exit_code == Some(0);
    let exit_code = exit_code.unwrap_or(UNOBSERVED_EXIT_CODE);
    let reboot_required = is_reboot_required(exit_code, &stdout, &stderr);

    ExecutionResult {
        success,
        exit_code,
        stdout,
        stderr,
        reboot_required,
    }
}

pub fn is_reboot_required(exit_code: i32, stdout: &str, stderr: &str) -> bool {
    exit_code == REBOOT_REQUIRED_EXIT_CODE
        || REBOOT_PATTERN.is_match(stdout)
        || REBOOT_PATTERN.is_match(stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_success() {
        let res = classify(Some(0), "Chocolatey installed 1/1 packages.".into(), String::new());
        assert!(res.success);
        assert_eq!(res.exit_code, 0);
        assert!(!res.reboot_required);
    }

    #[test]
    fn reboot_exit_code_is_not_success() {
        let res = classify(Some(3010), String::new(), String::new());
        assert!(!res.success);
        assert_eq!(res.exit_code, 3010);
        assert!(res.reboot_required);
    }

    #[test]
    fn reboot_phrase_any_casing() {
        for text in ["Reboot Required", "REBOOT REQUIRED", "a reboot required by msi"] {
            let res = classify(Some(0), text.into(), String::new());
            assert!(res.success);
            assert!(res.reboot_required, "{text}");

            let res = classify(Some(5), String::new(), text.into());
            assert!(res.reboot_required, "{text}");
        }
    }

    #[test]
    fn code_3010_in_text() {
        let res = classify(Some(0), "exit code was 3010".into(), String::new());
        assert!(res.reboot_required);
    }

    #[test]
    fn missing_exit_code_maps_to_sentinel() {
        let res = classify(None, "partial".into(), String::new());
        assert!(!res.success);
        assert_eq!(res.exit_code, UNOBSERVED_EXIT_CODE);
        assert!(!res.reboot_required);
    }

    #[test]
    fn phrase_split_across_streams_does_not_match() {
        let res = classify(Some(0), "reboot".into(), "required".into());
        assert!(!res.reboot_required);
    }
}
