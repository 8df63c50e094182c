//! # Core Module / 核心模块
//!
//! This module contains the core of the harness: the manifest reader, the
//! simulator invoker, the output parser, the result classifier and the report
//! aggregator.
//!
//! 此模块包含测试工具的核心：清单读取、模拟器调用、输出解析、结果分类和报告聚合。

pub mod aggregate;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod execution;
pub mod manifest;
pub mod models;
pub mod parser;

// Re-exports
pub use config::{HarnessConfig, RunOptions, TestMode};
pub use execution::run_test_case;
pub use models::{BatchReport, RunResult, TestCase};
