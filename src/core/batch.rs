//! # Batch Module / 批次模块
//!
//! Drives a whole batch: for each iteration the manifest is re-read, every
//! valid test case is run in manifest order, and the results are folded into
//! an iteration summary. The summaries are finally combined into the
//! [`BatchReport`].
//!
//! 驱动整个批次：每轮迭代都重新读取清单，按清单顺序运行每个有效的测试用例，
//! 并将结果折叠为迭代摘要。最后将所有摘要合并为 [`BatchReport`]。

use anyhow::Result;

use crate::core::{
    aggregate,
    config::{HarnessConfig, RunOptions},
    execution::run_test_case,
    manifest::{MalformedLineError, ManifestSource},
    models::{BatchReport, IterationSummary, ReportedRun},
};

/// Receives progress while a batch runs, so that results can be shown as
/// soon as each simulator run finishes.
///
/// 在批次运行期间接收进度，以便在每次模拟器运行结束后立即显示结果。
pub trait BatchObserver {
    fn iteration_started(&mut self, _index: u32) {}
    fn malformed_line(&mut self, _error: &MalformedLineError) {}
    fn run_finished(&mut self, _run: &ReportedRun) {}
    fn iteration_finished(&mut self, _summary: &IterationSummary) {}
}

/// An observer that ignores everything.
#[derive(Debug, Default)]
pub struct SilentObserver;

impl BatchObserver for SilentObserver {}

/// Runs every iteration of the batch, one test case at a time.
///
/// Only failing to read the manifest stops the batch; malformed lines,
/// simulator failures and unreadable output are recorded and the batch
/// moves on.
///
/// 逐个测试用例运行批次的每一轮迭代。
/// 只有读取清单失败才会终止批次；格式错误的行、模拟器失败和无法解析的输出都会被记录，批次继续进行。
pub async fn run_batch(
    source: &ManifestSource,
    config: &HarnessConfig,
    options: &RunOptions,
    observer: &mut dyn BatchObserver,
) -> Result<BatchReport> {
    let count = options.iterations.get();
    let mut iterations = Vec::with_capacity(count as usize);
    for index in 0..count {
        iterations.push(run_iteration(index, source, config, options, observer).await?);
    }
    Ok(aggregate::finalize(options.mode, iterations))
}

async fn run_iteration(
    index: u32,
    source: &ManifestSource,
    config: &HarnessConfig,
    options: &RunOptions,
    observer: &mut dyn BatchObserver,
) -> Result<IterationSummary> {
    log::info!("Starting iteration {index} of {}", source.path().display());
    observer.iteration_started(index);

    let entries = source.load()?;
    let mut runs = Vec::with_capacity(entries.len());
    let mut malformed_lines = 0;

    for entry in entries {
        match entry {
            Ok(case) => {
                let result = run_test_case(case, config, options).await;
                let run = aggregate::report(result, options.verbose);
                observer.run_finished(&run);
                runs.push(run);
            }
            Err(error) => {
                malformed_lines += 1;
                observer.malformed_line(&error);
            }
        }
    }

    let summary = aggregate::summarize_reported(index, runs, malformed_lines);
    observer.iteration_finished(&summary);
    Ok(summary)
}
