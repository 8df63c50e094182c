//! # Console Reporting Module / 控制台报告模块
//!
//! Prints run lines as they arrive, a time line after each iteration and the
//! closing summary block, with colors and internationalization support.
//!
//! 在运行结果到达时打印报告行，在每轮迭代后打印耗时，并打印最终摘要块，支持彩色输出和国际化。

use colored::*;

use crate::core::batch::BatchObserver;
use crate::core::manifest::MalformedLineError;
use crate::core::models::{format_float, BatchReport, IterationSummary, Outcome, ReportedRun};
use crate::infra::t;

const RULE: &str = "=================================";

/// Streams batch progress to stdout.
/// 将批次进度输出到 stdout。
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    locale: String,
}

impl ConsoleReporter {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }
}

impl BatchObserver for ConsoleReporter {
    fn iteration_started(&mut self, index: u32) {
        println!("{RULE}");
        println!("{}", t!("report.iteration", locale = &self.locale, index = index).bold());
        println!("{RULE}");
    }

    fn malformed_line(&mut self, error: &MalformedLineError) {
        println!(
            "{}",
            t!(
                "manifest.malformed_line",
                locale = &self.locale,
                line = error.line,
                label = error.label
            )
            .yellow()
        );
    }

    fn run_finished(&mut self, run: &ReportedRun) {
        let line = run.line.as_str();
        let colored_line = match &run.result.outcome {
            _ if run.is_clean() => line.green(),
            Outcome::EmergencyFailure { .. } => line.red().bold(),
            _ => line.red(),
        };
        println!("{colored_line}");
    }

    fn iteration_finished(&mut self, summary: &IterationSummary) {
        println!(
            "\n{}",
            t!(
                "report.iteration_time",
                locale = &self.locale,
                seconds = format_float(summary.total_real_seconds)
            )
        );
    }
}

/// Prints the closing block with total and average time over all iterations,
/// followed by outcome counts.
///
/// # Output Format / 输出格式
/// ```text
/// =================================
/// Total Time: 6.0s
/// Average Time: 2.0s
/// =================================
/// Outcomes: 3 ok, 0 failed, 0 malformed, 0 errors
/// ```
pub fn print_summary(report: &BatchReport, locale: &str) {
    println!("{RULE}");
    println!(
        "{}",
        t!("report.total_time", locale = locale, seconds = format_float(report.total_time))
    );
    println!(
        "{}",
        t!("report.average_time", locale = locale, seconds = format_float(report.average_time))
    );
    println!("{RULE}");

    let (ok, failed, malformed, errors) =
        report
            .iterations
            .iter()
            .fold((0, 0, 0, 0), |(ok, failed, malformed, errors), i| {
                (
                    ok + i.tally.ok,
                    failed + i.tally.emergency_failures,
                    malformed + i.tally.malformed_outputs + i.tally.malformed_lines,
                    errors + i.tally.invocation_errors + i.tally.format_errors,
                )
            });
    let outcomes = t!(
        "report.outcomes",
        locale = locale,
        ok = ok,
        failed = failed,
        malformed = malformed,
        errors = errors
    );
    if report.has_problems() {
        println!("{}", outcomes.yellow());
    } else {
        println!("{}", outcomes.green());
    }
}
