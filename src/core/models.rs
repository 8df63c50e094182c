//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures that flow through the harness:
//! test cases read from a manifest, captured simulator output, the parsed field
//! record, per-run results and the per-iteration and batch summaries.
//!
//! 此模块定义了在测试工具中流转的核心数据结构：
//! 从清单读取的测试用例、捕获的模拟器输出、解析后的字段记录、
//! 每次运行的结果以及每轮迭代和整个批次的摘要。

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::TestMode;

/// A single test parsed from one manifest line.
/// 从清单的一行解析出的单个测试。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// The identifier in the first column, used as the report label.
    /// 第一列中的标识符，用作报告标签。
    pub name: String,
    /// `.pass` file (acceptance) or `.cf` file (integration).
    pub primary_artifact: String,
    /// Runtime monitor class (acceptance) or `.mf` file (integration).
    pub secondary_artifact: String,
}

/// Everything a simulator run printed, stdout and stderr merged in arrival order.
/// 模拟器运行输出的全部内容，stdout 和 stderr 按到达顺序合并。
#[derive(Debug)]
pub struct RunOutput {
    pub text: String,
    /// Informational only: failures are encoded in the text, not the exit code.
    pub status: ExitStatus,
}

/// How a catalogue field's captured text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    /// A float followed by a unit suffix that is stripped before parsing.
    Duration,
    /// A safety event: a timestamp and a free-form message.
    Event,
}

/// The fixed catalogue of fields the simulator output may contain.
/// 模拟器输出中可能包含的固定字段目录。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    RandomSeed,
    Safety,
    Delivered,
    Stranded,
    Total,
    AverageDeliveryTime,
    MaximumDeliveryTime,
    DeliveryScore,
    AverageSatisfaction,
    MinSatisfaction,
    SatisfactionScore,
    SimTime,
    RealTime,
    WarningCount,
    StoppedNoCalls,
    OpenedNoCalls,
    LanternNotLit,
    LanternChangedDirection,
    ServicedWrongDirection,
    NoFastSpeed,
    NudgeBeforeReversal,
    Passed,
    Failed,
}

impl Field {
    /// Every field, in catalogue order.
    pub const ALL: [Field; 23] = [
        Field::RandomSeed,
        Field::Safety,
        Field::Delivered,
        Field::Stranded,
        Field::Total,
        Field::AverageDeliveryTime,
        Field::MaximumDeliveryTime,
        Field::DeliveryScore,
        Field::AverageSatisfaction,
        Field::MinSatisfaction,
        Field::SatisfactionScore,
        Field::SimTime,
        Field::RealTime,
        Field::WarningCount,
        Field::StoppedNoCalls,
        Field::OpenedNoCalls,
        Field::LanternNotLit,
        Field::LanternChangedDirection,
        Field::ServicedWrongDirection,
        Field::NoFastSpeed,
        Field::NudgeBeforeReversal,
        Field::Passed,
        Field::Failed,
    ];

    pub fn field_type(self) -> FieldType {
        match self {
            Field::Safety => FieldType::Event,
            Field::SimTime => FieldType::Duration,
            Field::AverageDeliveryTime
            | Field::MaximumDeliveryTime
            | Field::DeliveryScore
            | Field::AverageSatisfaction
            | Field::MinSatisfaction
            | Field::SatisfactionScore
            | Field::RealTime => FieldType::Float,
            _ => FieldType::Integer,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A typed value extracted for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u64),
    Float(f64),
    /// The timestamp is kept as printed so that reports echo it verbatim.
    Event { at: String, message: String },
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => f.write_str(&format_float(*v)),
            FieldValue::Event { at, message } => write!(f, "@{at}: {message}"),
        }
    }
}

/// Formats a float with at least one fractional digit (`2.0`, `12.25`).
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// The fields found in one run's output. A field that was not found is
/// absent; there is no default value and nothing carries over between runs.
///
/// 在一次运行输出中找到的字段。未找到的字段即为缺失；
/// 没有默认值，运行之间也不会沿用任何值。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedFields(BTreeMap<Field, FieldValue>);

impl ParsedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, value: FieldValue) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn integer(&self, field: Field) -> Option<u64> {
        match self.0.get(&field) {
            Some(FieldValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, field: Field) -> Option<f64> {
        match self.0.get(&field) {
            Some(FieldValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// The safety event, if one was reported.
    pub fn safety_event(&self) -> Option<(&str, &str)> {
        match self.0.get(&Field::Safety) {
            Some(FieldValue::Event { at, message }) => Some((at, message)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The category a run falls into.
/// 一次运行所属的类别。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The output was understood and no safety event was reported.
    Ok,
    /// The simulator aborted on a safety violation.
    EmergencyFailure { at: String, message: String },
    /// A field needed to interpret the run never appeared.
    MalformedOutput { missing: Field },
    /// The simulator could not be started or did not finish.
    InvocationFailed { reason: String },
}

/// A field the selected report format needs was not in the run's output.
/// 所选报告格式需要的字段不在运行输出中。
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("missing field {field}")]
pub struct FormatError {
    pub field: Field,
}

/// The result of running one test case once.
/// 运行一个测试用例一次的结果。
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub case: TestCase,
    pub mode: TestMode,
    pub outcome: Outcome,
    pub fields: ParsedFields,
    /// The simulator's own `real seconds` figure. `None` unless the run is OK
    /// and reported it.
    pub elapsed_real_seconds: Option<f64>,
    /// Wall-clock time measured by the harness around the invocation.
    pub wall_time: Duration,
}

impl RunResult {
    pub fn new(
        case: TestCase,
        mode: TestMode,
        outcome: Outcome,
        fields: ParsedFields,
        wall_time: Duration,
    ) -> Self {
        // Only a run that finished normally contributes its time.
        let elapsed_real_seconds = match outcome {
            Outcome::Ok => fields.float(Field::RealTime),
            _ => None,
        };
        Self {
            case,
            mode,
            outcome,
            fields,
            elapsed_real_seconds,
            wall_time,
        }
    }

    /// Builds the result for a run whose process never produced output.
    pub fn invocation_failed(
        case: TestCase,
        mode: TestMode,
        reason: String,
        wall_time: Duration,
    ) -> Self {
        Self::new(
            case,
            mode,
            Outcome::InvocationFailed { reason },
            ParsedFields::new(),
            wall_time,
        )
    }

    /// The echoed random seed, if the simulator printed one.
    pub fn seed(&self) -> Option<u64> {
        self.fields.integer(Field::RandomSeed)
    }

    /// The report label: `name(seed)` when a seed is known, otherwise `name`.
    pub fn label(&self) -> String {
        match self.seed() {
            Some(seed) if self.mode == TestMode::Acceptance => {
                format!("{}({})", self.case.name, seed)
            }
            _ => self.case.name.clone(),
        }
    }
}

/// A run together with its report text, rendered exactly once.
/// 一次运行及其报告文本，只渲染一次。
#[derive(Debug, Clone, Serialize)]
pub struct ReportedRun {
    pub result: RunResult,
    /// The report line or block, or an error line when rendering failed.
    pub line: String,
    /// Set when an OK run lacked a field the report format needs.
    pub format_error: Option<FormatError>,
}

impl ReportedRun {
    /// Whether the run finished normally and rendered without error.
    pub fn is_clean(&self) -> bool {
        self.result.outcome == Outcome::Ok && self.format_error.is_none()
    }
}

/// Outcome counts and count sums for one iteration. Sums only cover runs
/// whose line rendered without error.
///
/// 一轮迭代的结果计数和计数总和。总和只包括成功渲染的运行。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IterationTally {
    pub ok: usize,
    pub emergency_failures: usize,
    pub malformed_outputs: usize,
    pub format_errors: usize,
    pub invocation_errors: usize,
    pub malformed_lines: usize,
    pub delivered: u64,
    pub stranded: u64,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
}

impl IterationTally {
    /// Whether anything other than a clean pass happened in this iteration.
    pub fn has_problems(&self) -> bool {
        self.emergency_failures
            + self.malformed_outputs
            + self.format_errors
            + self.invocation_errors
            + self.malformed_lines
            > 0
    }
}

/// Everything recorded for one pass over the manifest.
/// 对清单一次完整遍历所记录的全部内容。
#[derive(Debug, Clone, Serialize)]
pub struct IterationSummary {
    pub index: u32,
    /// Every run with its report text, in manifest order.
    pub runs: Vec<ReportedRun>,
    pub total_real_seconds: f64,
    pub tally: IterationTally,
}

/// The terminal artifact of a batch.
/// 一个批次的最终产物。
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub mode: TestMode,
    pub iterations: Vec<IterationSummary>,
    pub total_time: f64,
    pub average_time: f64,
}

impl BatchReport {
    pub fn has_problems(&self) -> bool {
        self.iterations.iter().any(|i| i.tally.has_problems())
    }
}
