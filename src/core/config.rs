//! # Configuration Module / 配置模块
//!
//! This module defines the harness configuration loaded from `Harness.toml`
//! and the per-batch run options assembled by the command-line interface.
//!
//! 此模块定义从 `Harness.toml` 加载的测试工具配置，
//! 以及由命令行接口组装的每批次运行选项。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// The default name of the harness configuration file.
/// 测试工具配置文件的默认名称。
pub const DEFAULT_CONFIG_FILE: &str = "Harness.toml";

/// The kind of test a manifest describes. The mode decides which artifact
/// suffixes are accepted, which flags are passed to the simulator and which
/// fields the report requires.
///
/// 清单描述的测试类型。模式决定接受哪些产物后缀、
/// 传递给模拟器哪些标志以及报告需要哪些字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    /// `<name> <file>.pass <class>RuntimeMonitor`, run with `-pf/-monitor`.
    Acceptance,
    /// `<name> <file>.cf <file>.mf`, run with `-cf/-mf`.
    Integration,
}

impl TestMode {
    /// Required suffixes of the first and second artifact tokens.
    pub fn artifact_suffixes(self) -> (&'static str, &'static str) {
        match self {
            TestMode::Acceptance => (".pass", "RuntimeMonitor"),
            TestMode::Integration => (".cf", ".mf"),
        }
    }

    /// Short label used in diagnostics for the artifact at `position` (1 or 2).
    pub fn artifact_label(self, position: usize) -> &'static str {
        match (self, position) {
            (TestMode::Acceptance, 1) => "passfile",
            (TestMode::Acceptance, _) => "monitor",
            (TestMode::Integration, 1) => "configuration file",
            (TestMode::Integration, _) => "message file",
        }
    }
}

/// Harness-wide settings, loaded from a TOML file.
/// Every key is optional; missing keys fall back to the values the
/// simulator's course tooling has always used.
///
/// 从 TOML 文件加载的全局测试工具设置。
/// 每个键都是可选的；缺失的键回退到默认值。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// The language for the harness's messages (e.g., "en", "zh-CN").
    /// 测试工具消息的语言（例如 "en", "zh-CN"）。
    pub language: String,
    /// The Java launcher used to start the simulator.
    /// 用于启动模拟器的 Java 启动器。
    pub java_path: String,
    /// The simulator classpath. Relative paths are resolved against the
    /// current working directory.
    /// 模拟器的类路径。相对路径基于当前工作目录解析。
    pub classpath: String,
    /// Fully-qualified main class of the simulator.
    pub entry_point: String,
    /// Header file passed with `-head`.
    pub header_file: String,
    /// Fast speed passed verbatim with `-fs` in acceptance mode.
    pub fast_speed: String,
    /// Building size passed with `-b` in acceptance mode; omitted when unset.
    pub building_size: Option<u32>,
    /// Kill a simulator run after this many seconds. No limit when unset.
    /// 模拟器运行超过此秒数后将被终止。未设置时不限制。
    pub timeout_secs: Option<u64>,
    /// Default acceptance manifest.
    pub acceptance_manifest: PathBuf,
    /// Default integration manifest.
    pub integration_manifest: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            java_path: "/usr/bin/java".to_string(),
            classpath: "../../simulator/code".to_string(),
            entry_point: "simulator.framework.Elevator".to_string(),
            header_file: "headerfile".to_string(),
            fast_speed: "5.0".to_string(),
            building_size: Some(200),
            timeout_secs: None,
            acceptance_manifest: PathBuf::from("acceptance_tests.txt"),
            integration_manifest: PathBuf::from("integration_tests.txt"),
        }
    }
}

impl HarnessConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse harness configuration")
    }

    /// Loads the configuration from `path`.
    ///
    /// When `explicit` is false and the file does not exist, the defaults are
    /// returned. An explicitly requested file must exist.
    ///
    /// 从 `path` 加载配置。
    /// 当 `explicit` 为 false 且文件不存在时返回默认值。显式指定的文件必须存在。
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            log::debug!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }

    /// Renders the configuration as TOML, used by `init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize harness configuration")
    }

    /// The manifest used by `mode` when none is given on the command line.
    pub fn default_manifest(&self, mode: TestMode) -> &Path {
        match mode {
            TestMode::Acceptance => &self.acceptance_manifest,
            TestMode::Integration => &self.integration_manifest,
        }
    }
}

/// The configuration record for one batch, as handed over by the CLI.
/// 一个批次的配置记录，由 CLI 提供。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    pub mode: TestMode,
    /// Render every field of every run instead of the one-line summary.
    pub verbose: bool,
    /// How many times the whole manifest is run.
    pub iterations: NonZeroU32,
    /// Explicit random seed forwarded to the simulator (acceptance only).
    pub seed: Option<u64>,
}

impl RunOptions {
    pub fn new(mode: TestMode) -> Self {
        Self {
            mode,
            verbose: false,
            iterations: NonZeroU32::MIN,
            seed: None,
        }
    }
}
