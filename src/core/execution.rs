//! # Run Invoker Module / 运行调用模块
//!
//! Builds the simulator command line for a test case, runs it to completion
//! and turns the captured output into a [`RunResult`].
//!
//! 为测试用例构建模拟器命令行，运行至结束，并将捕获的输出转换为 [`RunResult`]。

use std::time::{Duration, Instant};
use thiserror::Error;

use crate::{
    core::{
        classifier::classify,
        config::{HarnessConfig, RunOptions, TestMode},
        models::{RunOutput, RunResult, TestCase},
        parser,
    },
    infra::{command, fs},
};

/// Why a simulator run produced no output to parse.
/// 模拟器运行未产生可解析输出的原因。
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The configured classpath or launcher path could not be resolved.
    #[error("invalid path: {0}")]
    Path(String),
    /// The process could not be started.
    #[error("could not start '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The process exceeded the configured timeout and was killed.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// A fully resolved simulator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Builds the command for `case`. The argument list depends only on the
    /// case, the configuration and the options.
    ///
    /// 为 `case` 构建命令。参数列表只取决于用例、配置和选项。
    pub fn build(
        case: &TestCase,
        config: &HarnessConfig,
        options: &RunOptions,
    ) -> Result<Self, InvocationError> {
        let program = fs::expand_path(&config.java_path)
            .map_err(|e| InvocationError::Path(format!("{e:#}")))?
            .to_string_lossy()
            .into_owned();
        let classpath = fs::resolve_path(&config.classpath)
            .map_err(|e| InvocationError::Path(format!("{e:#}")))?
            .to_string_lossy()
            .into_owned();

        let mut args = vec![
            "-cp".to_string(),
            classpath,
            config.entry_point.clone(),
            "-head".to_string(),
            config.header_file.clone(),
        ];

        match options.mode {
            TestMode::Acceptance => {
                args.extend([
                    "-pf".to_string(),
                    case.primary_artifact.clone(),
                    "-monitor".to_string(),
                    case.secondary_artifact.clone(),
                    "-fs".to_string(),
                    config.fast_speed.clone(),
                ]);
                if let Some(size) = config.building_size {
                    args.extend(["-b".to_string(), size.to_string()]);
                }
                if let Some(seed) = options.seed {
                    args.extend(["-seed".to_string(), seed.to_string()]);
                }
            }
            TestMode::Integration => {
                args.extend([
                    "-cf".to_string(),
                    case.primary_artifact.clone(),
                    "-mf".to_string(),
                    case.secondary_artifact.clone(),
                ]);
            }
        }

        Ok(Self { program, args })
    }

    pub fn command_line(&self) -> String {
        command::render_command_line(&self.program, &self.args)
    }
}

/// Runs `case` once and returns everything it printed.
/// A non-zero exit status is not an error: the simulator reports failures in
/// its output.
///
/// 运行 `case` 一次并返回其输出的全部内容。
/// 非零退出状态不是错误：模拟器在输出中报告失败。
pub async fn invoke(
    case: &TestCase,
    config: &HarnessConfig,
    options: &RunOptions,
) -> Result<RunOutput, InvocationError> {
    let invocation = Invocation::build(case, config, options)?;
    log::debug!("{}: {}", case.name, invocation.command_line());

    let mut cmd = tokio::process::Command::new(&invocation.program);
    cmd.args(&invocation.args).kill_on_drop(true);

    let capture = command::spawn_and_capture(cmd);
    let (status, text) = match config.timeout_secs.map(Duration::from_secs) {
        Some(limit) => tokio::time::timeout(limit, capture)
            .await
            .map_err(|_| InvocationError::TimedOut(limit))?,
        None => capture.await,
    };

    let status = status.map_err(|source| InvocationError::Launch {
        program: invocation.program.clone(),
        source,
    })?;
    if !status.success() {
        log::debug!("{} exited with {}", case.name, status);
    }

    Ok(RunOutput { text, status })
}

/// Invokes, parses and classifies one test case.
/// 调用、解析并分类一个测试用例。
pub async fn run_test_case(
    case: TestCase,
    config: &HarnessConfig,
    options: &RunOptions,
) -> RunResult {
    let start = Instant::now();
    let output = invoke(&case, config, options).await;
    let wall_time = start.elapsed();

    match output {
        Ok(output) => evaluate(case, options.mode, &output.text, wall_time),
        Err(e) => {
            log::warn!("{}: {}", case.name, e);
            RunResult::invocation_failed(case, options.mode, e.to_string(), wall_time)
        }
    }
}

/// Parses and classifies captured output.
pub fn evaluate(case: TestCase, mode: TestMode, text: &str, wall_time: Duration) -> RunResult {
    let fields = parser::parse(text);
    let outcome = classify(&fields, mode);
    RunResult::new(case, mode, outcome, fields, wall_time)
}
