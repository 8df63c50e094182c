//! # Classifier Module Unit Tests / 分类模块单元测试
//!
//! Tests for the outcome priority rules.
//!
//! 测试结果优先级规则。

mod common;

use common::{SAFETY_OUTPUT, STANDARD_OUTPUT};
use sim_harness::config::TestMode;
use sim_harness::core::classifier::classify;
use sim_harness::models::{Field, Outcome};
use sim_harness::parser::parse;

#[cfg(test)]
mod acceptance_classification_tests {
    use super::*;

    #[test]
    fn test_standard_run_is_ok() {
        assert_eq!(classify(&parse(STANDARD_OUTPUT), TestMode::Acceptance), Outcome::Ok);
    }

    #[test]
    fn test_safety_event_beats_standard_metrics() {
        let parsed = parse(SAFETY_OUTPUT);
        assert!(parsed.contains(Field::Delivered));
        assert_eq!(
            classify(&parsed, TestMode::Acceptance),
            Outcome::EmergencyFailure {
                at: "12.5".to_string(),
                message: "door forced".to_string()
            }
        );
    }

    #[test]
    fn test_safety_event_after_metrics_still_wins() {
        let text = format!("{STANDARD_OUTPUT}[Safety] @99.0: overweight\n");
        assert!(matches!(
            classify(&parse(&text), TestMode::Acceptance),
            Outcome::EmergencyFailure { .. }
        ));
    }

    #[test]
    fn test_missing_seed_is_malformed_whatever_else_is_present() {
        let without_seed = SAFETY_OUTPUT.replace("RandomSeed = 42", "");
        let malformed = Outcome::MalformedOutput {
            missing: Field::RandomSeed,
        };
        assert_eq!(classify(&parse(&without_seed), TestMode::Acceptance), malformed);
        assert_eq!(
            classify(&parse("Delivered: 3\nStranded: 0\nTotal: 3\n"), TestMode::Acceptance),
            malformed
        );
        assert_eq!(classify(&parse(""), TestMode::Acceptance), malformed);
    }

    #[test]
    fn test_seed_alone_is_ok() {
        // Missing metrics are a formatting problem, not a classification one.
        assert_eq!(classify(&parse("RandomSeed = 1"), TestMode::Acceptance), Outcome::Ok);
    }
}

#[cfg(test)]
mod integration_classification_tests {
    use super::*;

    #[test]
    fn test_both_counters_present_is_ok() {
        assert_eq!(
            classify(&parse("Passed: 5\nFailed: 2\n"), TestMode::Integration),
            Outcome::Ok
        );
    }

    #[test]
    fn test_missing_counter_is_malformed() {
        assert_eq!(
            classify(&parse("Failed: 2\n"), TestMode::Integration),
            Outcome::MalformedOutput {
                missing: Field::Passed
            }
        );
        assert_eq!(
            classify(&parse("Passed: 5\n"), TestMode::Integration),
            Outcome::MalformedOutput {
                missing: Field::Failed
            }
        );
    }

    #[test]
    fn test_integration_ignores_seed_and_safety() {
        let text = "[Safety] @1.0: ignored here\nPassed: 1\nFailed: 0\n";
        assert_eq!(classify(&parse(text), TestMode::Integration), Outcome::Ok);
    }
}
