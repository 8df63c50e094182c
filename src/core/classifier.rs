//! # Result Classifier Module / 结果分类模块
//!
//! Decides the outcome of a run from the fields found in its output.
//! The rules are ordered and the first one that matches wins.
//!
//! 根据输出中找到的字段决定一次运行的结果。规则有先后顺序，以第一个匹配的规则为准。

use crate::core::config::TestMode;
use crate::core::models::{Field, Outcome, ParsedFields};

/// Classifies a parsed run.
///
/// Acceptance runs:
/// 1. no `RandomSeed` echoed: the output was not understood at all;
/// 2. a `[Safety]` event: emergency failure, whatever else was printed;
/// 3. otherwise OK.
///
/// Integration runs need both the `Passed` and the `Failed` counters.
///
/// 对解析后的运行进行分类。
pub fn classify(parsed: &ParsedFields, mode: TestMode) -> Outcome {
    match mode {
        TestMode::Acceptance => classify_acceptance(parsed),
        TestMode::Integration => classify_integration(parsed),
    }
}

fn classify_acceptance(parsed: &ParsedFields) -> Outcome {
    if !parsed.contains(Field::RandomSeed) {
        return Outcome::MalformedOutput {
            missing: Field::RandomSeed,
        };
    }
    // A safety abort invalidates the standard counters even when present.
    if let Some((at, message)) = parsed.safety_event() {
        return Outcome::EmergencyFailure {
            at: at.to_string(),
            message: message.to_string(),
        };
    }
    Outcome::Ok
}

fn classify_integration(parsed: &ParsedFields) -> Outcome {
    for field in [Field::Passed, Field::Failed] {
        if !parsed.contains(field) {
            return Outcome::MalformedOutput { missing: field };
        }
    }
    Outcome::Ok
}
