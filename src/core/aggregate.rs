//! # Report Aggregator Module / 报告聚合模块
//!
//! Turns run results into report lines, folds one iteration's results into an
//! [`IterationSummary`] and all iterations into the final [`BatchReport`].
//!
//! 将运行结果转换为报告行，把一轮迭代的结果折叠为 [`IterationSummary`]，
//! 并把所有迭代折叠为最终的 [`BatchReport`]。

use crate::core::config::TestMode;
use crate::core::models::{
    BatchReport, Field, FieldValue, IterationSummary, IterationTally, Outcome, ReportedRun,
    RunResult,
};

pub use crate::core::models::FormatError;

/// Fields rendered by the one-line acceptance summary.
pub const TERSE_ACCEPTANCE_FIELDS: [Field; 4] = [
    Field::Delivered,
    Field::Stranded,
    Field::Total,
    Field::WarningCount,
];

/// Fields rendered by the verbose acceptance block.
pub const VERBOSE_ACCEPTANCE_FIELDS: [Field; 19] = [
    Field::Delivered,
    Field::Stranded,
    Field::Total,
    Field::AverageDeliveryTime,
    Field::MaximumDeliveryTime,
    Field::DeliveryScore,
    Field::AverageSatisfaction,
    Field::MinSatisfaction,
    Field::SatisfactionScore,
    Field::WarningCount,
    Field::StoppedNoCalls,
    Field::OpenedNoCalls,
    Field::LanternNotLit,
    Field::LanternChangedDirection,
    Field::ServicedWrongDirection,
    Field::NoFastSpeed,
    Field::NudgeBeforeReversal,
    Field::SimTime,
    Field::RealTime,
];

/// Fields rendered for an integration run.
pub const INTEGRATION_FIELDS: [Field; 2] = [Field::Passed, Field::Failed];

/// The fields an OK run must supply to be rendered in the given format.
pub fn required_fields(mode: TestMode, verbose: bool) -> &'static [Field] {
    match (mode, verbose) {
        (TestMode::Acceptance, false) => &TERSE_ACCEPTANCE_FIELDS,
        (TestMode::Acceptance, true) => &VERBOSE_ACCEPTANCE_FIELDS,
        (TestMode::Integration, _) => &INTEGRATION_FIELDS,
    }
}

/// Renders one run. Absent required fields are an error, never blanked.
///
/// 渲染一次运行。缺失的必需字段是错误，绝不会留空。
pub fn format_run(result: &RunResult, verbose: bool) -> Result<String, FormatError> {
    let label = result.label();
    let name = &result.case.name;

    match &result.outcome {
        Outcome::InvocationFailed { reason } => Ok(format!("{name}: ERROR: {reason}")),
        Outcome::MalformedOutput { missing } => Ok(match result.mode {
            TestMode::Acceptance => format!("{name}: ERROR: malformed output ({missing})"),
            TestMode::Integration => format!("{name}: Error running test"),
        }),
        Outcome::EmergencyFailure { at, message } => {
            if verbose {
                Ok(format!("{label}: FAILED @ {at}\n\t{message}"))
            } else {
                Ok(format!("{label}: FAILED @ {at}"))
            }
        }
        Outcome::Ok => {
            // Check every required field first so the error names the first
            // missing one in rendering order.
            for &field in required_fields(result.mode, verbose) {
                if !result.fields.contains(field) {
                    return Err(FormatError { field });
                }
            }
            let v = |field: Field| value(result, field);
            Ok(match (result.mode, verbose) {
                (TestMode::Integration, _) => {
                    format!("{name}: {} passed, {} failed", v(Field::Passed), v(Field::Failed))
                }
                (TestMode::Acceptance, false) => format!(
                    "{label}: {} delivered, {} stranded, {} total, {} warnings",
                    v(Field::Delivered),
                    v(Field::Stranded),
                    v(Field::Total),
                    v(Field::WarningCount),
                ),
                (TestMode::Acceptance, true) => [
                    format!("{label}:"),
                    format!(
                        "  Delivery: {} delivered, {} stranded, {} total",
                        v(Field::Delivered),
                        v(Field::Stranded),
                        v(Field::Total)
                    ),
                    format!(
                        "  Delivery Perf: {} avg, {} max, {} score",
                        v(Field::AverageDeliveryTime),
                        v(Field::MaximumDeliveryTime),
                        v(Field::DeliveryScore)
                    ),
                    format!(
                        "  Satisfaction: {} avg, {} min, {} score",
                        v(Field::AverageSatisfaction),
                        v(Field::MinSatisfaction),
                        v(Field::SatisfactionScore)
                    ),
                    format!(
                        "  Warnings: {} w, {} snc, {} onc, {} lantern no lit, {} lantern change dir, \
                         {} service wrong dir, {} no fast speed, {} nr",
                        v(Field::WarningCount),
                        v(Field::StoppedNoCalls),
                        v(Field::OpenedNoCalls),
                        v(Field::LanternNotLit),
                        v(Field::LanternChangedDirection),
                        v(Field::ServicedWrongDirection),
                        v(Field::NoFastSpeed),
                        v(Field::NudgeBeforeReversal)
                    ),
                    format!("  Time: {}s ({}s real)", v(Field::SimTime), v(Field::RealTime)),
                ]
                .join("\n"),
            })
        }
    }
}

fn value(result: &RunResult, field: Field) -> String {
    result
        .fields
        .get(field)
        .map(FieldValue::to_string)
        .unwrap_or_default()
}

/// Renders one run for the report, turning a [`FormatError`] into a visible
/// error line.
///
/// 为报告渲染一次运行，并将 [`FormatError`] 转换为可见的错误行。
pub fn accumulate(result: &RunResult, verbose: bool) -> String {
    format_run(result, verbose).unwrap_or_else(|e| error_line(result, &e))
}

fn error_line(result: &RunResult, error: &FormatError) -> String {
    format!("{}: ERROR: {}", result.label(), error)
}

/// Renders `result` once and keeps the line next to it, along with the
/// format error if there was one.
pub fn report(result: RunResult, verbose: bool) -> ReportedRun {
    let (line, format_error) = match format_run(&result, verbose) {
        Ok(line) => (line, None),
        Err(e) => (error_line(&result, &e), Some(e)),
    };
    ReportedRun {
        result,
        line,
        format_error,
    }
}

/// Renders and folds one iteration's results, in manifest order, into its
/// summary.
///
/// # Arguments
/// * `index` - 0-based iteration index
/// * `results` - The runs of this iteration, in manifest order
/// * `malformed_lines` - Manifest lines skipped during this iteration
/// * `verbose` - Which line format to render
pub fn summarize(
    index: u32,
    results: Vec<RunResult>,
    malformed_lines: usize,
    verbose: bool,
) -> IterationSummary {
    let runs = results.into_iter().map(|r| report(r, verbose)).collect();
    summarize_reported(index, runs, malformed_lines)
}

/// Folds runs that were already rendered with [`report`].
///
/// 折叠已经通过 [`report`] 渲染过的运行。
pub fn summarize_reported(
    index: u32,
    runs: Vec<ReportedRun>,
    malformed_lines: usize,
) -> IterationSummary {
    let initial = IterationSummary {
        index,
        runs: Vec::with_capacity(runs.len()),
        total_real_seconds: 0.0,
        tally: IterationTally {
            malformed_lines,
            ..IterationTally::default()
        },
    };

    runs.into_iter().fold(initial, |mut summary, run| {
        tally_run(&mut summary.tally, &run);
        if let Some(seconds) = run.result.elapsed_real_seconds {
            summary.total_real_seconds += seconds;
        }
        summary.runs.push(run);
        summary
    })
}

fn tally_run(tally: &mut IterationTally, run: &ReportedRun) {
    let result = &run.result;
    match &result.outcome {
        Outcome::InvocationFailed { .. } => tally.invocation_errors += 1,
        Outcome::MalformedOutput { .. } => tally.malformed_outputs += 1,
        Outcome::EmergencyFailure { .. } => tally.emergency_failures += 1,
        Outcome::Ok if run.format_error.is_some() => tally.format_errors += 1,
        Outcome::Ok => {
            tally.ok += 1;
            let count = |field| result.fields.integer(field).unwrap_or(0);
            match result.mode {
                TestMode::Acceptance => {
                    tally.delivered += count(Field::Delivered);
                    tally.stranded += count(Field::Stranded);
                    tally.total += count(Field::Total);
                }
                TestMode::Integration => {
                    tally.passed += count(Field::Passed);
                    tally.failed += count(Field::Failed);
                }
            }
        }
    }
}

/// Combines all iterations into the batch report. The average divides the
/// summed iteration times by the number of iterations.
///
/// 将所有迭代合并为批次报告。平均值为迭代时间总和除以迭代次数。
pub fn finalize(mode: TestMode, iterations: Vec<IterationSummary>) -> BatchReport {
    let total_time: f64 = iterations.iter().map(|i| i.total_real_seconds).sum();
    let average_time = if iterations.is_empty() {
        0.0
    } else {
        total_time / iterations.len() as f64
    };
    BatchReport {
        mode,
        iterations,
        total_time,
        average_time,
    }
}
